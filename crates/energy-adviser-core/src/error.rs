//! Error types for energy-adviser-core
//!
//! The analytics themselves never fail: degenerate input (empty series, zero
//! variance, zero denominators) falls back to explicit zero-valued results.
//! Errors only arise at the boundaries, when a payload or a config file is read.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for energy-adviser operations
#[derive(Error, Debug)]
pub enum CoreError {
    // ===================
    // Input Errors
    // ===================
    #[error("Invalid data format: {reason}")]
    InvalidInput { reason: String },

    // ===================
    // IO Errors
    // ===================
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    // ===================
    // Parse Errors
    // ===================
    #[error("Failed to parse JSON in {path}: {message}")]
    JsonParse {
        path: PathBuf,
        message: String,
        #[source]
        source: serde_json::Error,
    },

    // ===================
    // Config Errors
    // ===================
    #[error("Failed to read config: {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl CoreError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        CoreError::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Actionable hint for the user, if one applies
    pub fn suggestion(&self) -> Option<String> {
        match self {
            CoreError::InvalidInput { .. } => Some(
                "Expected a JSON array of readings, or an object with a \"data\" array"
                    .to_string(),
            ),
            CoreError::FileNotFound { path } => {
                Some(format!("Check if file exists: ls {}", path.display()))
            }
            CoreError::FileRead { path, .. } | CoreError::ConfigRead { path, .. } => {
                Some(format!("Check permissions: ls -l {}", path.display()))
            }
            CoreError::JsonParse { .. } => {
                Some("Validate JSON syntax with: jq . <file>".to_string())
            }
            CoreError::InvalidConfig { .. } => None,
        }
    }

    /// True when the caller sent something other than a reading sequence
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, CoreError::InvalidInput { .. })
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
