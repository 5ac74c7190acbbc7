//! # Catalog Client
//!
//! High-level API for the [`catalog_actor`](crate::catalog_actor).

use crate::catalog_actor::{CatalogError, CatalogRequest};
use crate::framework::ActorHandle;
use crate::model::Product;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, instrument};

/// Client for interacting with the Catalog actor.
#[derive(Clone)]
pub struct CatalogClient {
    inner: ActorHandle<CatalogRequest>,
    products: watch::Receiver<Arc<Vec<Product>>>,
}

impl CatalogClient {
    pub fn new(
        inner: ActorHandle<CatalogRequest>,
        products: watch::Receiver<Arc<Vec<Product>>>,
    ) -> Self {
        Self { inner, products }
    }

    /// Replace the displayed list with the full catalog.
    #[instrument(skip(self))]
    pub async fn show_all(&self) -> Result<Arc<Vec<Product>>, CatalogError> {
        debug!("Sending request");
        self.inner
            .ask(|respond_to| CatalogRequest::ShowAll { respond_to })
            .await?
    }

    /// Replace the displayed list with the search result for `query`.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Arc<Vec<Product>>, CatalogError> {
        debug!("Sending request");
        self.inner
            .ask(|respond_to| CatalogRequest::Search {
                query: query.to_string(),
                respond_to,
            })
            .await?
    }

    pub async fn snapshot(&self) -> Result<Arc<Vec<Product>>, CatalogError> {
        Ok(self
            .inner
            .ask(|respond_to| CatalogRequest::Snapshot { respond_to })
            .await?)
    }

    /// Receiver that sees every replacement of the displayed list.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<Product>>> {
        self.products.clone()
    }
}
