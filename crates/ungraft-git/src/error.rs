//! Error types for ungraft-git.

use std::path::PathBuf;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during repository inspection.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The path is not inside a git repository.
    #[error("the path {} is not within a git repository", path.display())]
    NotARepository {
        /// Path that was searched from.
        path: PathBuf,
    },

    /// The commit object could not be read.
    #[error("commit object not found: {0}")]
    MissingCommit(String),

    /// The name resolved to an object that is not a commit.
    #[error("{id} is a {kind}, not a commit")]
    NotACommit {
        /// Name that was looked up.
        id: String,
        /// Kind of object it resolved to.
        kind: String,
    },

    /// Another process holds the shallow lockfile.
    #[error("shallow file is locked: {} exists", .0.display())]
    StoreLocked(PathBuf),

    /// The shallow file was modified by another process during the run.
    #[error("shallow file changed while ungrafting: {}", .0.display())]
    StoreChanged(PathBuf),

    /// IO error while reading or writing the shallow file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Underlying git2 error.
    #[error("git error: {0}")]
    Git2(#[from] git2::Error),
}
