//! Error types for the persistence gateway
//!
//! "Not found" is never an error here; selects return `Ok(None)` and
//! callers treat everything else as a logged, abandoned operation.

use thiserror::Error;

/// Errors from the remote persistence service
#[derive(Debug, Error)]
pub enum PersistError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Remote returned a non-success status
    #[error("Remote error ({status}): {message}")]
    Remote {
        /// HTTP status code
        status: u16,
        /// Error body from the service
        message: String,
    },

    /// Row payload could not be encoded or decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
