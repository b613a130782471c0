//! Error types for patoweb-config

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigErrorCode {
    /// File not found or unreadable
    IoError,
    /// Invalid YAML format
    InvalidYaml,
    /// Invalid field value
    InvalidValue,
}

impl std::fmt::Display for ConfigErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigErrorCode::IoError => write!(f, "IO_ERROR"),
            ConfigErrorCode::InvalidYaml => write!(f, "INVALID_YAML"),
            ConfigErrorCode::InvalidValue => write!(f, "INVALID_VALUE"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file could not be read")]
    IoError,

    #[error("Configuration file is not valid YAML")]
    InvalidYaml,

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ConfigError {
    /// Error code for API responses and logs
    pub fn code(&self) -> ConfigErrorCode {
        match self {
            ConfigError::IoError => ConfigErrorCode::IoError,
            ConfigError::InvalidYaml => ConfigErrorCode::InvalidYaml,
            ConfigError::InvalidValue { .. } => ConfigErrorCode::InvalidValue,
        }
    }
}
