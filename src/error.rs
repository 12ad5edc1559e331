//! Error types for restack
//!
//! Uses `thiserror` for library errors; the binary boundary wraps these in
//! `anyhow` for reporting.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for restack operations
pub type RestackResult<T> = Result<T, RestackError>;

/// Main error type for restack operations
#[derive(Error, Debug)]
pub enum RestackError {
    /// Template file exists but its parameter section cannot be parsed
    #[error("malformed template {file}: {message}")]
    MalformedTemplate { file: PathBuf, message: String },

    /// Interactive input closed before a parameter value could be read
    #[error("input closed while waiting for a value for parameter '{parameter}'")]
    PromptClosed { parameter: String },

    /// Invalid installer configuration
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Deployed-parameter snapshot exists but cannot be parsed
    #[error("unreadable snapshot {file}: {message}")]
    MalformedSnapshot { file: PathBuf, message: String },

    /// Update was aborted by the operator at the confirmation prompt
    #[error("update aborted by user")]
    UpdateAborted,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
