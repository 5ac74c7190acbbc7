//! Messages for the Catalog actor.

use super::CatalogError;
use crate::framework::Response;
use crate::model::Product;
use std::sync::Arc;

/// Result of a request that replaces the displayed list.
pub type CatalogResult = Result<Arc<Vec<Product>>, CatalogError>;

#[derive(Debug)]
pub enum CatalogRequest {
    /// Display the unfiltered catalog.
    ShowAll { respond_to: Response<CatalogResult> },
    /// Display the server-side search result for `query`. An empty query shows everything.
    Search {
        query: String,
        respond_to: Response<CatalogResult>,
    },
    /// Read the list currently on display.
    Snapshot {
        respond_to: Response<Arc<Vec<Product>>>,
    },
}
