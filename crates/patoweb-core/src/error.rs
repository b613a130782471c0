//! Error types for patoweb-core
//!
//! Only total source unavailability is meant to reach the user; every other
//! degradation (bad value, missing parameter, unknown month label) resolves
//! to a documented default inside the aggregator.

use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Snapshot not loaded yet (or last refresh failed)
    NotLoaded,
    /// Source tables could not be read
    SourceUnavailable,
    /// IO error
    IoError,
    /// Internal error
    InternalError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::NotLoaded => write!(f, "NOT_LOADED"),
            ErrorCode::SourceUnavailable => write!(f, "SOURCE_UNAVAILABLE"),
            ErrorCode::IoError => write!(f, "IO_ERROR"),
            ErrorCode::InternalError => write!(f, "INTERNAL_ERROR"),
        }
    }
}

/// Error body for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Snapshot not loaded")]
    NotLoaded,

    #[error("Source unavailable: {message}")]
    SourceUnavailable { message: String },

    #[error("IO error")]
    IoError(#[from] io::Error),

    #[error("Internal error")]
    InternalError,
}

impl CoreError {
    /// Error code for API responses
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::NotLoaded => ErrorCode::NotLoaded,
            CoreError::SourceUnavailable { .. } => ErrorCode::SourceUnavailable,
            CoreError::IoError(_) => ErrorCode::IoError,
            CoreError::InternalError => ErrorCode::InternalError,
        }
    }

    /// Build the serializable error body
    pub fn details(&self) -> ErrorDetails {
        ErrorDetails {
            code: self.code(),
            message: self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(CoreError::NotLoaded.code(), ErrorCode::NotLoaded);
        let err = CoreError::SourceUnavailable {
            message: "missing file".to_string(),
        };
        assert_eq!(err.code(), ErrorCode::SourceUnavailable);
        assert_eq!(err.code().to_string(), "SOURCE_UNAVAILABLE");
    }

    #[test]
    fn test_details_serialize() {
        let details = CoreError::NotLoaded.details();
        let json = serde_json::to_string(&details).unwrap();
        assert!(json.contains("NOT_LOADED"));
    }
}
