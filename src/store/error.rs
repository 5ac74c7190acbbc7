//! Error types for the remote store clients.

use thiserror::Error;

/// How a remote call failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// No token, or the backend answered 401.
    #[error("Not authenticated")]
    Unauthenticated,

    /// The backend refused the request (400 or 404). `message` is the backend's own text.
    #[error("Rejected by backend ({status}): {message}")]
    ValidationRejected { status: u16, message: String },

    /// Transport failure, 5xx, or a body that could not be decoded.
    #[error("Backend unreachable: {0}")]
    Unreachable(String),
}
