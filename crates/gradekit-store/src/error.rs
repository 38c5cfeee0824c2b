//! Store error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when reading or writing a snapshot store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The stored document exists but is not a valid snapshot.
    #[error("snapshot at {} is corrupt: {message}", path.display())]
    Corrupt { path: PathBuf, message: String },

    /// The backend refused the operation.
    #[error("snapshot store unavailable: {0}")]
    Unavailable(String),
}
