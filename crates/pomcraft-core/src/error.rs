//! Core error types for pomcraft-core.
//!
//! Store mutations never fail (see the storage modules); errors here cover
//! store construction and internal persistence paths.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pomcraft-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Data directory could not be resolved or created
    #[error("Failed to prepare data directory {path}: {message}")]
    DataDir { path: PathBuf, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
