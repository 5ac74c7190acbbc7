//! Error types for the Catalog actor.

use crate::framework::FrameworkError;
use crate::store::StoreError;
use thiserror::Error;

/// Errors that can occur while loading the displayed catalog.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalog endpoint failed; the displayed list was emptied.
    #[error("Catalog fetch failed: {0}")]
    Store(#[from] StoreError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for CatalogError {
    fn from(e: FrameworkError) -> Self {
        CatalogError::ActorCommunicationError(e.to_string())
    }
}
