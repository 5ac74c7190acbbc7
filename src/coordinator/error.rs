//! Error types for cart mutations.

use crate::framework::FrameworkError;
use crate::model::{Notice, ProductId};
use crate::store::StoreError;
use thiserror::Error;

pub const LOGIN_REQUIRED: &str = "Login to add an item to the Cart";
pub const ALREADY_IN_CART: &str =
    "Item already in cart. Use the cart sidebar to update quantity or remove item.";
pub const BACKEND_UNREACHABLE: &str =
    "Could not fetch cart details. Check that the backend is running, reachable and returns valid JSON.";

/// Why a cart operation was refused. The local cart is unchanged in every case.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CartError {
    /// No session token; nothing was sent.
    #[error("Not authenticated")]
    Unauthenticated,

    /// The add-to-cart entry point was used for a product already in the cart.
    #[error("Product already in cart: {0}")]
    DuplicateItem(ProductId),

    /// The backend refused the product id or quantity. Holds the backend's message.
    #[error("{0}")]
    ValidationRejected(String),

    /// Network failure, 5xx, or a malformed response.
    #[error("Backend unreachable: {0}")]
    Unreachable(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl CartError {
    /// The message shown to the user for this failure.
    pub fn notice(&self) -> Notice {
        match self {
            CartError::Unauthenticated => Notice::warning(LOGIN_REQUIRED),
            CartError::DuplicateItem(_) => Notice::warning(ALREADY_IN_CART),
            CartError::ValidationRejected(message) => Notice::error(message.clone()),
            CartError::Unreachable(_) | CartError::ActorCommunicationError(_) => {
                Notice::error(BACKEND_UNREACHABLE)
            }
        }
    }
}

impl From<StoreError> for CartError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Unauthenticated => CartError::Unauthenticated,
            StoreError::ValidationRejected { message, .. } => CartError::ValidationRejected(message),
            StoreError::Unreachable(reason) => CartError::Unreachable(reason),
        }
    }
}

impl From<FrameworkError> for CartError {
    fn from(e: FrameworkError) -> Self {
        CartError::ActorCommunicationError(e.to_string())
    }
}
