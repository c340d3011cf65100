//! Error types for electra-one

use thiserror::Error;

/// Result type alias for electra-one operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating Electra One documents
#[derive(Debug, Error)]
pub enum Error {
    /// MIDI channel outside of 1-16
    #[error("Invalid MIDI channel: {0} (zero-based, must be 0-15)")]
    InvalidChannel(u8),

    /// A parameter without an integer range was asked for a value descriptor
    #[error("Parameter '{parameter}' has no integer range, cannot build its value descriptor")]
    MissingRange { parameter: String },

    /// More bindings than the device has control slots
    #[error("Too many controls for one preset: {count} (maximum is {max})")]
    TooManyControls { count: usize, max: usize },

    /// The bundled schema could not be loaded
    #[error("Schema error: {0}")]
    SchemaLoad(String),

    /// A generated instrument definition did not validate against the schema
    #[error("Invalid instrument definition generated: {}", .0.join("; "))]
    InvalidDocument(Vec<String>),

    /// A mapping control refers to a parameter that is not declared
    #[error("Control '{control}' refers to unknown parameter '{parameter}'")]
    UnknownParameter { control: String, parameter: String },

    /// Mapping file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
