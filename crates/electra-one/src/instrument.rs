//! Instrument definition generation.
//!
//! An instrument definition is the device's catalog of a synth: which
//! parameters exist, their ranges, their lookup tables and the sysex message
//! that changes each of them.
//!
//! # Example
//!
//! ```
//! use electra_one::{Color, ControllerBinding, InstrumentDefinitionBuilder, MidiChannel, Parameter, SynthParameter};
//! use std::sync::Arc;
//!
//! let cutoff: Arc<dyn SynthParameter> = Arc::new(Parameter::new("Cutoff", 15, 0, 63));
//! let bindings = vec![ControllerBinding::encoder("Cutoff", 1, Color::Blue, cutoff)];
//!
//! let json = InstrumentDefinitionBuilder::default()
//!     .build(&bindings, MidiChannel::default())
//!     .unwrap();
//! assert!(json.contains("\"parameters\""));
//! ```

use crate::binding::ControllerBinding;
use crate::error::Result;
use crate::midi::MidiChannel;
use crate::overlay::{Overlay, OverlayCatalog};
use crate::schema::{InstrumentSchema, INSTRUMENT_SCHEMA};
use crate::synth::{operating_channel, Synth, SynthIdentity};
use crate::value::{build_values, ValueDescriptor};
use serde::Serialize;
use std::borrow::Cow;

/// Id of the single category every parameter is filed under
pub const GLOBAL_CATEGORY: &str = "global";

#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    Fader,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterEntry {
    pub category_id: String,
    #[serde(rename = "type")]
    pub kind: ParameterType,
    pub name: String,
    pub values: Vec<ValueDescriptor>,
}

/// The instrument definition document
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentDefinition {
    pub id: String,
    pub name: String,
    pub manufacturer: String,
    pub manufacturer_id: String,
    pub categories: Vec<Category>,
    pub overlays: Vec<Overlay>,
    pub parameters: Vec<ParameterEntry>,
}

/// Builds instrument definitions for one synth identity.
#[derive(Debug, Clone)]
pub struct InstrumentDefinitionBuilder {
    identity: SynthIdentity,
    schema: Cow<'static, str>,
}

impl Default for InstrumentDefinitionBuilder {
    fn default() -> Self {
        Self::new(SynthIdentity::default())
    }
}

impl InstrumentDefinitionBuilder {
    pub fn new(identity: SynthIdentity) -> Self {
        Self {
            identity,
            schema: Cow::Borrowed(INSTRUMENT_SCHEMA),
        }
    }

    /// Validate against `schema` instead of the bundled schema.
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Cow::Owned(schema.into());
        self
    }

    pub fn identity(&self) -> &SynthIdentity {
        &self.identity
    }

    /// Build the document without serializing or validating it.
    pub fn definition(
        &self,
        bindings: &[ControllerBinding],
        channel: MidiChannel,
    ) -> Result<InstrumentDefinition> {
        let catalog = OverlayCatalog::collect(bindings);

        let parameters = bindings
            .iter()
            .map(|binding| {
                Ok(ParameterEntry {
                    category_id: GLOBAL_CATEGORY.to_string(),
                    kind: ParameterType::Fader,
                    name: binding.name().to_string(),
                    values: build_values(binding, channel, &catalog)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(InstrumentDefinition {
            id: self.identity.id.clone(),
            name: self.identity.name.clone(),
            manufacturer: self.identity.manufacturer.clone(),
            manufacturer_id: self.identity.manufacturer_id.clone(),
            categories: vec![Category {
                id: GLOBAL_CATEGORY.to_string(),
                label: "Globals".to_string(),
            }],
            overlays: catalog.into_overlays(),
            parameters,
        })
    }

    /// Build the instrument definition JSON for `bindings`, with value change
    /// messages addressed to `channel`.
    ///
    /// The document is validated against the schema before it is returned.
    /// If the schema itself cannot be loaded the document is returned
    /// unvalidated.
    pub fn build(&self, bindings: &[ControllerBinding], channel: MidiChannel) -> Result<String> {
        self.identity.validate()?;
        let definition = self.definition(bindings, channel)?;
        let document = serde_json::to_value(&definition)?;

        match InstrumentSchema::parse(&self.schema) {
            Ok(schema) => {
                if let Err(e) = schema.validate(&document) {
                    log::error!("Program error, invalid instrument definition created: {}", e);
                    return Err(e);
                }
            }
            Err(e) => {
                log::warn!("Cannot validate instrument definition: {}", e);
            }
        }

        Ok(serde_json::to_string(&definition)?)
    }

    /// Build the instrument definition for `synth`, using its identity and
    /// the channel it listens on.
    pub fn build_for_synth(synth: &dyn Synth, bindings: &[ControllerBinding]) -> Result<String> {
        Self::new(synth.identity()).build(bindings, operating_channel(synth))
    }
}

impl From<SynthIdentity> for InstrumentDefinitionBuilder {
    fn from(identity: SynthIdentity) -> Self {
        Self::new(identity)
    }
}

/// Validate a serialized instrument definition against the bundled schema.
pub fn validate_instrument_json(json: &str) -> Result<()> {
    let document: serde_json::Value = serde_json::from_str(json)?;
    InstrumentSchema::bundled()?.validate(&document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::error::Error;
    use crate::parameter::{Parameter, SynthParameter};
    use serde_json::Value;
    use std::sync::Arc;

    fn example_bindings() -> Vec<ControllerBinding> {
        let cutoff: Arc<dyn SynthParameter> = Arc::new(Parameter::new("Cutoff", 15, 0, 127));
        let wave: Arc<dyn SynthParameter> =
            Arc::new(Parameter::new("Waveform", 3, 0, 3).with_labels(["Saw", "Square", "Tri", "Sine"]));
        vec![
            ControllerBinding::encoder("Cutoff", 1, Color::Blue, cutoff),
            ControllerBinding::encoder("Waveform", 2, Color::Red, wave),
        ]
    }

    fn build_json(bindings: &[ControllerBinding]) -> Value {
        let json = InstrumentDefinitionBuilder::default()
            .build(bindings, MidiChannel::default())
            .unwrap();
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn test_example_instrument() {
        let doc = build_json(&example_bindings());

        assert_eq!(doc["id"], "testid");
        assert_eq!(doc["name"], "Korg DW8000");
        assert_eq!(doc["categories"][0]["id"], "global");

        let overlays = doc["overlays"].as_array().unwrap();
        assert_eq!(overlays.len(), 1);
        assert_eq!(overlays[0]["id"], 1);
        assert_eq!(overlays[0]["name"], "Waveform");
        assert_eq!(overlays[0]["items"].as_array().unwrap().len(), 4);
        assert_eq!(overlays[0]["items"][2]["label"], "Tri");

        let parameters = doc["parameters"].as_array().unwrap();
        assert_eq!(parameters.len(), 2);
        assert_eq!(parameters[0]["type"], "fader");
        assert_eq!(parameters[0]["categoryId"], "global");
        assert_eq!(parameters[0]["name"], "Cutoff");
        assert!(parameters[0]["values"][0].get("overlayId").is_none());
        assert_eq!(parameters[1]["values"][0]["overlayId"], 1);
    }

    #[test]
    fn test_output_validates() {
        let json = InstrumentDefinitionBuilder::default()
            .build(&example_bindings(), MidiChannel::from_one_based(16).unwrap())
            .unwrap();
        assert!(validate_instrument_json(&json).is_ok());
    }

    #[test]
    fn test_channel_in_messages() {
        let json = InstrumentDefinitionBuilder::default()
            .build(&example_bindings(), MidiChannel::from_zero_based(5).unwrap())
            .unwrap();
        let doc: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(doc["parameters"][0]["values"][0]["message"]["data"][2], 0x35);
    }

    #[test]
    fn test_identity_is_threaded_through() {
        let identity = SynthIdentity {
            id: "ob6".to_string(),
            name: "OB-6".to_string(),
            manufacturer: "Sequential".to_string(),
            manufacturer_id: "sequential".to_string(),
        };
        let json = InstrumentDefinitionBuilder::new(identity)
            .build(&example_bindings(), MidiChannel::default())
            .unwrap();
        let doc: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(doc["id"], "ob6");
        assert_eq!(doc["manufacturer"], "Sequential");
        assert_eq!(doc["manufacturerId"], "sequential");
    }

    #[test]
    fn test_deterministic_output() {
        let bindings = example_bindings();
        let builder = InstrumentDefinitionBuilder::default();
        let first = builder.build(&bindings, MidiChannel::default()).unwrap();
        let second = builder.build(&bindings, MidiChannel::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unloadable_schema_skips_validation() {
        let json = InstrumentDefinitionBuilder::default()
            .with_schema("{ broken")
            .build(&example_bindings(), MidiChannel::default());
        assert!(json.is_ok());
    }

    #[test]
    fn test_schema_violation_is_fatal() {
        let strict = r#"{
            "type": "object",
            "properties": { "parameters": { "type": "array", "maxItems": 1 } }
        }"#;
        let result = InstrumentDefinitionBuilder::default()
            .with_schema(strict)
            .build(&example_bindings(), MidiChannel::default());
        assert!(matches!(result, Err(Error::InvalidDocument(_))));
    }

    #[test]
    fn test_missing_range_fails_build() {
        let broken: Arc<dyn SynthParameter> = Arc::new(Parameter::without_range("Broken", 9));
        let bindings = vec![ControllerBinding::encoder("Broken", 1, Color::White, broken)];
        let result = InstrumentDefinitionBuilder::default().build(&bindings, MidiChannel::default());
        assert!(matches!(result, Err(Error::MissingRange { .. })));
    }

    #[test]
    fn test_empty_identity_is_a_config_error() {
        let identity = SynthIdentity {
            id: String::new(),
            ..SynthIdentity::default()
        };
        let result = InstrumentDefinitionBuilder::new(identity)
            .build(&example_bindings(), MidiChannel::default());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_empty_binding_list() {
        let doc = build_json(&[]);
        assert_eq!(doc["overlays"].as_array().unwrap().len(), 0);
        assert_eq!(doc["parameters"].as_array().unwrap().len(), 0);
    }
}
