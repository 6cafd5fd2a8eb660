//! Error types for ungraft-core.

use std::path::PathBuf;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in ungraft-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Config file parsing error.
    #[error("failed to parse {file}: {message}")]
    ConfigParseError { file: PathBuf, message: String },

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Repository backend error.
    #[error(transparent)]
    Git(#[from] ungraft_git::Error),
}
