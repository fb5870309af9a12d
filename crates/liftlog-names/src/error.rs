//! Error types for liftlog-names

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for name operations
pub type Result<T> = std::result::Result<T, NameError>;

/// Errors reported to the caller by validation and merge planning.
///
/// Neither kind is retried internally; the engine performs no I/O.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NameError {
    /// Name too short or blank
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Merge requested with no records or a blank target name
    #[error("Empty selection: {0}")]
    EmptySelection(String),
}

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A threshold lies outside [0.0, 1.0]
    #[error("Value out of range: {0}")]
    OutOfRange(String),

    /// Thresholds are not strictly increasing (warn < cluster < auto-merge)
    #[error("Invalid thresholds: {0}")]
    InvalidThresholds(String),

    /// A count limit is zero
    #[error("Invalid limit: {0}")]
    InvalidLimit(String),

    /// The configuration document could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
