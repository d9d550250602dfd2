//! Error types
//!
//! Invalid user input is caught at the boundary with a [`ValidationError`], before any record reaches a store.
//! Persistence failures are reported as [`StoreError`]s.

use std::path::PathBuf;

/// Raised when user input cannot be turned into a valid record field
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Title cannot be empty")]
    EmptyTitle,
    #[error("Invalid color tag {value:?}: {reason}")]
    InvalidColor { value: String, reason: String },
}

/// Raised when the backing file of a store cannot be read or written
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Unable to access store file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unable to (de)serialize the store contents: {0}")]
    Serialization(#[from] serde_json::Error),
}
