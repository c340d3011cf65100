//! Validation of generated instrument definitions.
//!
//! The instrument definition schema is compiled into the library. A document
//! that fails validation points at a bug in the generator, not at bad input.

use crate::error::{Error, Result};
use serde_json::Value;

/// Bundled Electra One instrument definition schema
pub const INSTRUMENT_SCHEMA: &str = include_str!("../schema/instrument.schema.json");

/// A compiled instrument definition schema.
pub struct InstrumentSchema {
    validator: jsonschema::Validator,
}

impl InstrumentSchema {
    /// Compile the bundled schema.
    pub fn bundled() -> Result<Self> {
        Self::parse(INSTRUMENT_SCHEMA)
    }

    /// Compile a schema from its JSON text.
    pub fn parse(text: &str) -> Result<Self> {
        let schema: Value =
            serde_json::from_str(text).map_err(|e| Error::SchemaLoad(e.to_string()))?;
        let validator =
            jsonschema::validator_for(&schema).map_err(|e| Error::SchemaLoad(e.to_string()))?;
        Ok(Self { validator })
    }

    /// Validate `document`, collecting every violation.
    pub fn validate(&self, document: &Value) -> Result<()> {
        let errors: Vec<String> = self
            .validator
            .iter_errors(document)
            .map(|e| format!("{} at '{}'", e, e.instance_path))
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidDocument(errors))
        }
    }
}
