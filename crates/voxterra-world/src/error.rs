//! Error types for world persistence operations.

use std::path::PathBuf;
use thiserror::Error;
use voxterra_common::PackIdError;

/// Errors that can occur while reading or writing world files.
#[derive(Debug, Error)]
pub enum PersistError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON document
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A document had a valid JSON shape but not the expected structure
    #[error("invalid document {path}: {reason}")]
    InvalidDocument {
        /// File the document was read from
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },

    /// The indices document had valid JSON but not the expected structure
    #[error("malformed indices document: {0}")]
    MalformedIndices(String),

    /// The indices file was required but does not exist
    #[error("indices file missing: {0}")]
    MissingIndices(PathBuf),

    /// A pack id failed validation
    #[error("invalid pack id: {0}")]
    InvalidPackId(#[from] PackIdError),
}

/// Result type for world persistence operations.
pub type PersistResult<T> = Result<T, PersistError>;
