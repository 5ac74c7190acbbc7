//! # Mock Framework & Testing Guide
//!
//! Scripted stand-ins for the remote store traits, so coordinator and actor
//! logic can be tested without a backend.
//!
//! ## When to use Mocks vs the HTTP backend
//!
//! | Feature | Mock | [`HttpBackend`](crate::store::HttpBackend) + test server |
//! |---------|------|-----------------|
//! | **Speed** | Instant (in-memory) | Real sockets |
//! | **Determinism** | Responses and their timing are scripted | Subject to the scheduler |
//! | **Use Case** | Ordering, races, error handling | Wire format, status mapping |
//! | **Error Injection** | Easy (`return_err`) | Needs a custom route |
//!
//! ## Example
//!
//! ```rust
//! use cart_sync::framework::mock::MockCartStore;
//! use cart_sync::model::{ProductId, RawCartEntry, Session};
//! use cart_sync::store::CartStore;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = MockCartStore::new();
//!     store
//!         .expect_upsert(ProductId::from("a"), 1)
//!         .return_ok(vec![RawCartEntry::new("a", 1)]);
//!
//!     let session = Session::authenticated("token", "crio");
//!     let cart = store.upsert(&session, &ProductId::from("a"), 1).await.unwrap();
//!     assert_eq!(cart.len(), 1);
//!
//!     store.verify(); // Ensures all expectations were met
//! }
//! ```
//!
//! ## Holding a response back
//!
//! `return_ok_when` / `return_err_when` park the call until the paired
//! `oneshot::Sender` fires (or is dropped). Together with
//! [`MockCartStore::wait_for_upsert_calls`] this lets a test decide exactly
//! which in-flight request finishes first.

use crate::model::{Product, ProductId, RawCartEntry, Session};
use crate::store::{CartStore, CatalogSource, StoreError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::{oneshot, Notify};

type Gate = Option<oneshot::Receiver<()>>;

async fn pass(gate: Gate) {
    if let Some(gate) = gate {
        let _ = gate.await;
    }
}

// =============================================================================
// CART STORE
// =============================================================================

enum CartExpectation {
    Fetch {
        response: Result<Vec<RawCartEntry>, StoreError>,
        gate: Gate,
    },
    Upsert {
        product_id: ProductId,
        qty: u32,
        response: Result<Vec<RawCartEntry>, StoreError>,
        gate: Gate,
    },
}

/// A [`CartStore`] that answers from a list of expectations.
///
/// Fetches are matched in order. Upserts are matched by product id, so
/// concurrent calls for different products may arrive in any order; the
/// expected quantity is asserted. Calls without a session token behave like the
/// real client (no-op fetch, `Unauthenticated` upsert) and are not counted.
#[derive(Default)]
pub struct MockCartStore {
    expectations: Mutex<VecDeque<CartExpectation>>,
    fetch_calls: AtomicUsize,
    upsert_calls: AtomicUsize,
    calls_changed: Notify,
}

impl MockCartStore {
    /// Creates a new mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a `fetch` call.
    pub fn expect_fetch(&self) -> FetchExpectationBuilder<'_> {
        FetchExpectationBuilder { store: self }
    }

    /// Expects an `upsert` of `qty` units of `product_id`.
    pub fn expect_upsert(&self, product_id: ProductId, qty: u32) -> UpsertExpectationBuilder<'_> {
        UpsertExpectationBuilder {
            store: self,
            product_id,
            qty,
        }
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn upsert_calls(&self) -> usize {
        self.upsert_calls.load(Ordering::SeqCst)
    }

    /// Resolves once at least `n` upserts have reached the mock.
    pub async fn wait_for_upsert_calls(&self, n: usize) {
        loop {
            let notified = self.calls_changed.notified();
            if self.upsert_calls() >= n {
                return;
            }
            notified.await;
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.lock().len();
        if remaining > 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<CartExpectation>> {
        self.expectations
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn push(&self, expectation: CartExpectation) {
        self.lock().push_back(expectation);
    }
}

#[async_trait]
impl CartStore for MockCartStore {
    async fn fetch(&self, session: &Session) -> Result<Option<Vec<RawCartEntry>>, StoreError> {
        if !session.is_authenticated() {
            return Ok(None);
        }
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.calls_changed.notify_waiters();

        let expectation = {
            let mut expectations = self.lock();
            let index = expectations
                .iter()
                .position(|e| matches!(e, CartExpectation::Fetch { .. }));
            index.and_then(|i| expectations.remove(i))
        };
        match expectation {
            Some(CartExpectation::Fetch { response, gate }) => {
                pass(gate).await;
                response.map(Some)
            }
            _ => panic!("Unexpected fetch"),
        }
    }

    async fn upsert(
        &self,
        session: &Session,
        product_id: &ProductId,
        qty: u32,
    ) -> Result<Vec<RawCartEntry>, StoreError> {
        if !session.is_authenticated() {
            return Err(StoreError::Unauthenticated);
        }
        self.upsert_calls.fetch_add(1, Ordering::SeqCst);
        self.calls_changed.notify_waiters();

        let expectation = {
            let mut expectations = self.lock();
            let index = expectations.iter().position(
                |e| matches!(e, CartExpectation::Upsert { product_id: id, .. } if id == product_id),
            );
            index.and_then(|i| expectations.remove(i))
        };
        match expectation {
            Some(CartExpectation::Upsert {
                qty: expected,
                response,
                gate,
                ..
            }) => {
                assert_eq!(qty, expected, "Unexpected quantity for {product_id}");
                pass(gate).await;
                response
            }
            _ => panic!("Unexpected upsert for {product_id}"),
        }
    }
}

/// Builder for `fetch` expectations.
pub struct FetchExpectationBuilder<'a> {
    store: &'a MockCartStore,
}

impl FetchExpectationBuilder<'_> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, entries: Vec<RawCartEntry>) {
        self.respond(Ok(entries), None);
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: StoreError) {
        self.respond(Err(error), None);
    }

    /// Returns `entries` once `gate` fires.
    pub fn return_ok_when(self, entries: Vec<RawCartEntry>, gate: oneshot::Receiver<()>) {
        self.respond(Ok(entries), Some(gate));
    }

    fn respond(self, response: Result<Vec<RawCartEntry>, StoreError>, gate: Gate) {
        self.store.push(CartExpectation::Fetch { response, gate });
    }
}

/// Builder for `upsert` expectations.
pub struct UpsertExpectationBuilder<'a> {
    store: &'a MockCartStore,
    product_id: ProductId,
    qty: u32,
}

impl UpsertExpectationBuilder<'_> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, entries: Vec<RawCartEntry>) {
        self.respond(Ok(entries), None);
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: StoreError) {
        self.respond(Err(error), None);
    }

    /// Returns `entries` once `gate` fires.
    pub fn return_ok_when(self, entries: Vec<RawCartEntry>, gate: oneshot::Receiver<()>) {
        self.respond(Ok(entries), Some(gate));
    }

    /// Returns `error` once `gate` fires.
    pub fn return_err_when(self, error: StoreError, gate: oneshot::Receiver<()>) {
        self.respond(Err(error), Some(gate));
    }

    fn respond(self, response: Result<Vec<RawCartEntry>, StoreError>, gate: Gate) {
        self.store.push(CartExpectation::Upsert {
            product_id: self.product_id,
            qty: self.qty,
            response,
            gate,
        });
    }
}

// =============================================================================
// CATALOG SOURCE
// =============================================================================

enum CatalogExpectation {
    List {
        response: Result<Vec<Product>, StoreError>,
    },
    Search {
        query: String,
        response: Result<Vec<Product>, StoreError>,
    },
}

/// A [`CatalogSource`] that answers from an ordered list of expectations and
/// records every query it receives.
#[derive(Default)]
pub struct MockCatalogSource {
    expectations: Mutex<VecDeque<CatalogExpectation>>,
    calls: Mutex<Vec<Option<String>>>,
}

impl MockCatalogSource {
    /// Creates a new mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect_list(&self) -> ListExpectationBuilder<'_> {
        ListExpectationBuilder { source: self }
    }

    pub fn expect_search(&self, query: impl Into<String>) -> SearchExpectationBuilder<'_> {
        SearchExpectationBuilder {
            source: self,
            query: query.into(),
        }
    }

    /// Every call so far, in order: `None` for a full listing, `Some(query)` for a search.
    pub fn calls(&self) -> Vec<Option<String>> {
        self.calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.lock().len();
        if remaining > 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<CatalogExpectation>> {
        self.expectations
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn record(&self, call: Option<String>) -> Option<CatalogExpectation> {
        self.calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(call);
        self.lock().pop_front()
    }
}

#[async_trait]
impl CatalogSource for MockCatalogSource {
    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        match self.record(None) {
            Some(CatalogExpectation::List { response }) => response,
            _ => panic!("Unexpected request or expectation mismatch"),
        }
    }

    async fn search_products(&self, query: &str) -> Result<Vec<Product>, StoreError> {
        match self.record(Some(query.to_string())) {
            Some(CatalogExpectation::Search {
                query: expected,
                response,
            }) if expected == query => response,
            _ => panic!("Unexpected search for {query:?}"),
        }
    }
}

/// Builder for `list_products` expectations.
pub struct ListExpectationBuilder<'a> {
    source: &'a MockCatalogSource,
}

impl ListExpectationBuilder<'_> {
    pub fn return_ok(self, products: Vec<Product>) {
        self.source
            .lock()
            .push_back(CatalogExpectation::List { response: Ok(products) });
    }

    pub fn return_err(self, error: StoreError) {
        self.source
            .lock()
            .push_back(CatalogExpectation::List { response: Err(error) });
    }
}

/// Builder for `search_products` expectations.
pub struct SearchExpectationBuilder<'a> {
    source: &'a MockCatalogSource,
    query: String,
}

impl SearchExpectationBuilder<'_> {
    pub fn return_ok(self, products: Vec<Product>) {
        self.source.lock().push_back(CatalogExpectation::Search {
            query: self.query,
            response: Ok(products),
        });
    }

    pub fn return_err(self, error: StoreError) {
        self.source.lock().push_back(CatalogExpectation::Search {
            query: self.query,
            response: Err(error),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upserts_match_by_product_not_arrival_order() {
        let store = MockCartStore::new();
        let session = Session::authenticated("token", "crio");
        store
            .expect_upsert(ProductId::from("a"), 1)
            .return_ok(vec![RawCartEntry::new("a", 1)]);
        store
            .expect_upsert(ProductId::from("b"), 2)
            .return_ok(vec![RawCartEntry::new("b", 2)]);

        let b = store.upsert(&session, &ProductId::from("b"), 2).await.unwrap();
        let a = store.upsert(&session, &ProductId::from("a"), 1).await.unwrap();

        assert_eq!(b, vec![RawCartEntry::new("b", 2)]);
        assert_eq!(a, vec![RawCartEntry::new("a", 1)]);
        assert_eq!(store.upsert_calls(), 2);
        store.verify();
    }

    #[tokio::test]
    async fn test_anonymous_calls_never_reach_expectations() {
        let store = MockCartStore::new();
        let session = Session::anonymous();

        assert_eq!(store.fetch(&session).await, Ok(None));
        assert_eq!(
            store.upsert(&session, &ProductId::from("a"), 1).await,
            Err(StoreError::Unauthenticated)
        );
        assert_eq!(store.fetch_calls() + store.upsert_calls(), 0);
    }

    #[tokio::test]
    async fn test_gated_response_waits_for_release() {
        let store = std::sync::Arc::new(MockCartStore::new());
        let (release, gate) = oneshot::channel();
        store
            .expect_upsert(ProductId::from("a"), 1)
            .return_ok_when(vec![RawCartEntry::new("a", 1)], gate);

        let call = tokio::spawn({
            let store = store.clone();
            async move {
                let session = Session::authenticated("token", "crio");
                store.upsert(&session, &ProductId::from("a"), 1).await
            }
        });

        store.wait_for_upsert_calls(1).await;
        assert!(!call.is_finished());

        release.send(()).unwrap();
        assert_eq!(call.await.unwrap().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_catalog_mock_records_calls() {
        let source = MockCatalogSource::new();
        source.expect_list().return_ok(Vec::new());
        source
            .expect_search("lamp")
            .return_err(StoreError::Unreachable("down".into()));

        assert!(source.list_products().await.unwrap().is_empty());
        assert!(source.search_products("lamp").await.is_err());
        assert_eq!(source.calls(), vec![None, Some("lamp".to_string())]);
        source.verify();
    }
}
