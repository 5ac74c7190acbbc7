use super::{CatalogError, CatalogRequest, CatalogResult};
use crate::framework::ActorState;
use crate::model::Product;
use crate::store::{CatalogSource, StoreError};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

/// The displayed product list and the query that produced it.
pub struct CatalogState {
    products: Arc<Vec<Product>>,
    query: Option<String>,
    publisher: watch::Sender<Arc<Vec<Product>>>,
}

impl CatalogState {
    /// Returns the empty initial state and a receiver that observes every replacement.
    pub fn new() -> (Self, watch::Receiver<Arc<Vec<Product>>>) {
        let products = Arc::new(Vec::new());
        let (publisher, receiver) = watch::channel(Arc::clone(&products));
        let state = Self {
            products,
            query: None,
            publisher,
        };
        (state, receiver)
    }

    fn apply(
        &mut self,
        query: Option<String>,
        fetched: Result<Vec<Product>, StoreError>,
    ) -> CatalogResult {
        let (products, result) = match fetched {
            Ok(products) => {
                let products = Arc::new(products);
                (Arc::clone(&products), Ok(products))
            }
            Err(e) => {
                warn!(?query, error = %e, "Catalog fetch failed, showing nothing");
                (Arc::new(Vec::new()), Err(CatalogError::Store(e)))
            }
        };

        info!(?query, size = products.len(), "Catalog replaced");
        self.query = query;
        self.products = Arc::clone(&products);
        self.publisher.send_replace(products);
        result
    }
}

#[async_trait]
impl ActorState for CatalogState {
    type Request = CatalogRequest;
    type Context = Arc<dyn CatalogSource>;

    async fn handle(&mut self, request: CatalogRequest, source: &Arc<dyn CatalogSource>) {
        match request {
            CatalogRequest::ShowAll { respond_to } => {
                let fetched = source.list_products().await;
                let _ = respond_to.send(self.apply(None, fetched));
            }
            CatalogRequest::Search { query, respond_to } if query.is_empty() => {
                let fetched = source.list_products().await;
                let _ = respond_to.send(self.apply(None, fetched));
            }
            CatalogRequest::Search { query, respond_to } => {
                let fetched = source.search_products(&query).await;
                let _ = respond_to.send(self.apply(Some(query), fetched));
            }
            CatalogRequest::Snapshot { respond_to } => {
                let _ = respond_to.send(Arc::clone(&self.products));
            }
        }
    }

    fn on_shutdown(&mut self) {
        info!(query = ?self.query, size = self.products.len(), "Catalog closed");
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog_actor::{self, CatalogError};
    use crate::framework::mock::MockCatalogSource;
    use crate::model::Product;
    use crate::store::{CatalogSource, StoreError};
    use std::sync::Arc;

    fn products() -> Vec<Product> {
        vec![
            Product::new("a", "Basketball", "Sports", 100.0),
            Product::new("b", "iPhone XR", "Phones", 50.0),
        ]
    }

    #[tokio::test]
    async fn test_failed_fetch_empties_the_list() {
        let source = Arc::new(MockCatalogSource::new());
        source.expect_list().return_ok(products());
        source
            .expect_search("phone")
            .return_err(StoreError::Unreachable("connection refused".into()));

        let (actor, catalog) = catalog_actor::new(4);
        let context: Arc<dyn CatalogSource> = source.clone();
        tokio::spawn(actor.run(context));

        assert_eq!(catalog.show_all().await.unwrap().len(), 2);
        let failed = catalog.search("phone").await;

        assert_eq!(
            failed,
            Err(CatalogError::Store(StoreError::Unreachable(
                "connection refused".into()
            )))
        );
        assert!(catalog.snapshot().await.unwrap().is_empty());
        assert!(catalog.subscribe().borrow().is_empty());
        source.verify();
    }

    #[tokio::test]
    async fn test_empty_query_lists_everything() {
        let source = Arc::new(MockCatalogSource::new());
        source.expect_list().return_ok(products());

        let (actor, catalog) = catalog_actor::new(4);
        let context: Arc<dyn CatalogSource> = source.clone();
        tokio::spawn(actor.run(context));

        let shown = catalog.search("").await.unwrap();

        assert_eq!(*shown, products());
        assert_eq!(source.calls(), vec![None]);
        source.verify();
    }
}
