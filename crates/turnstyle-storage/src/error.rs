//! Storage errors.

use std::time::Duration;

use thiserror::Error;

/// A failed storage call.
///
/// Always recoverable: callers report it and leave the page untouched.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend did not answer within the configured limit.
    #[error("storage call timed out after {0:?}")]
    Timeout(Duration),
    /// Reading or writing the backing file failed.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// Stored data could not be encoded or decoded.
    #[error("storage data is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}
