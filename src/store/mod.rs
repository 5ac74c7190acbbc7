//! Remote accessors for the catalog and the authoritative cart.
//!
//! The rest of the crate only sees the [`CatalogSource`] and [`CartStore`]
//! traits. [`HttpBackend`] implements both against the storefront REST API;
//! tests substitute the scripted mocks in [`crate::framework::mock`].

pub mod error;
pub mod http;

pub use error::*;
pub use http::*;

use crate::model::{Product, ProductId, RawCartEntry, Session};
use async_trait::async_trait;

/// Read access to the product catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// `GET /products`: the unfiltered catalog.
    async fn list_products(&self) -> Result<Vec<Product>, StoreError>;

    /// `GET /products/search?value=<query>`: products whose name or category match.
    async fn search_products(&self, query: &str) -> Result<Vec<Product>, StoreError>;
}

/// Access to the server-held cart of the session's user.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// `GET /cart`. Returns `Ok(None)` without touching the network when the
    /// session carries no token.
    async fn fetch(&self, session: &Session) -> Result<Option<Vec<RawCartEntry>>, StoreError>;

    /// `POST /cart`. Sets the quantity of one product and returns the complete
    /// resulting cart. Fails with [`StoreError::Unauthenticated`] before any
    /// network call when the session carries no token.
    async fn upsert(
        &self,
        session: &Session,
        product_id: &ProductId,
        qty: u32,
    ) -> Result<Vec<RawCartEntry>, StoreError>;
}
