#![allow(dead_code)]

use async_trait::async_trait;
use cart_sync::config::Settings;
use cart_sync::model::{Product, ProductId, RawCartEntry, Session};
use cart_sync::store::{CartStore, CatalogSource, StoreError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::{oneshot, Notify};

pub const TOKEN: &str = "test-token";

pub fn session() -> Session {
    Session::authenticated(TOKEN, "crio")
}

pub fn settings() -> Settings {
    Settings {
        mailbox_capacity: 8,
        ..Settings::default()
    }
}

pub fn catalog() -> Vec<Product> {
    vec![
        Product::new("a", "Basketball", "Sports", 100.0).with_rating(5),
        Product::new("b", "iPhone XR", "Phones", 50.0).with_rating(4),
        Product::new("c", "Yoga Mat", "Sports", 20.0).with_rating(3),
    ]
}

/// A stateful stand-in for the storefront backend.
///
/// Carts are kept per token. Setting a quantity of zero removes the entry,
/// unknown products are refused with a 404, and any upsert can be held back
/// before or after it is applied so tests can reorder the server's work and
/// its responses.
pub struct InMemoryBackend {
    products: Vec<Product>,
    carts: Mutex<HashMap<String, Vec<RawCartEntry>>>,
    held: Mutex<HashMap<ProductId, oneshot::Receiver<()>>>,
    held_unapplied: Mutex<HashMap<ProductId, oneshot::Receiver<()>>>,
    received: AtomicUsize,
    upserts: AtomicUsize,
    fetches: AtomicUsize,
    searches: AtomicUsize,
    progress: Notify,
}

impl InMemoryBackend {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            carts: Mutex::new(HashMap::new()),
            held: Mutex::new(HashMap::new()),
            held_unapplied: Mutex::new(HashMap::new()),
            received: AtomicUsize::new(0),
            upserts: AtomicUsize::new(0),
            fetches: AtomicUsize::new(0),
            searches: AtomicUsize::new(0),
            progress: Notify::new(),
        }
    }

    pub fn with_cart(self, token: &str, entries: Vec<RawCartEntry>) -> Self {
        self.carts.lock().unwrap().insert(token.to_string(), entries);
        self
    }

    /// The next upsert of `product_id` is applied right away but answers only
    /// once the returned sender fires.
    pub fn hold(&self, product_id: &ProductId) -> oneshot::Sender<()> {
        let (release, gate) = oneshot::channel();
        self.held.lock().unwrap().insert(product_id.clone(), gate);
        release
    }

    /// The next upsert of `product_id` is applied only once the returned
    /// sender fires, so upserts issued after it are applied first.
    pub fn hold_unapplied(&self, product_id: &ProductId) -> oneshot::Sender<()> {
        let (release, gate) = oneshot::channel();
        self.held_unapplied
            .lock()
            .unwrap()
            .insert(product_id.clone(), gate);
        release
    }

    pub fn server_cart(&self, token: &str) -> Vec<RawCartEntry> {
        self.carts
            .lock()
            .unwrap()
            .get(token)
            .cloned()
            .unwrap_or_default()
    }

    pub fn upserts(&self) -> usize {
        self.upserts.load(Ordering::SeqCst)
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn searches(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }

    /// Resolves once at least `n` upserts have arrived, applied or not.
    pub async fn wait_for_received(&self, n: usize) {
        loop {
            let notified = self.progress.notified();
            if self.received.load(Ordering::SeqCst) >= n {
                return;
            }
            notified.await;
        }
    }

    pub async fn wait_for_upserts(&self, n: usize) {
        loop {
            let notified = self.progress.notified();
            if self.upserts() >= n {
                return;
            }
            notified.await;
        }
    }
}

#[async_trait]
impl CatalogSource for InMemoryBackend {
    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.products.clone())
    }

    async fn search_products(&self, query: &str) -> Result<Vec<Product>, StoreError> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        let query = query.to_lowercase();
        Ok(self
            .products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&query) || p.category.to_lowercase().contains(&query)
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CartStore for InMemoryBackend {
    async fn fetch(&self, session: &Session) -> Result<Option<Vec<RawCartEntry>>, StoreError> {
        let Some(token) = session.bearer() else {
            return Ok(None);
        };
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(Some(self.server_cart(token)))
    }

    async fn upsert(
        &self,
        session: &Session,
        product_id: &ProductId,
        qty: u32,
    ) -> Result<Vec<RawCartEntry>, StoreError> {
        let token = session.bearer().ok_or(StoreError::Unauthenticated)?;
        if !self.products.iter().any(|p| &p.id == product_id) {
            return Err(StoreError::ValidationRejected {
                status: 404,
                message: "Product doesn't exist".into(),
            });
        }

        self.received.fetch_add(1, Ordering::SeqCst);
        self.progress.notify_waiters();
        let gate = self.held_unapplied.lock().unwrap().remove(product_id);
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        let cart = {
            let mut carts = self.carts.lock().unwrap();
            let cart = carts.entry(token.to_string()).or_default();
            match cart.iter().position(|e| &e.product_id == product_id) {
                Some(i) if qty == 0 => {
                    cart.remove(i);
                }
                Some(i) => cart[i].qty = qty,
                None if qty > 0 => cart.push(RawCartEntry::new(product_id.clone(), qty)),
                None => {}
            }
            cart.clone()
        };
        self.upserts.fetch_add(1, Ordering::SeqCst);
        self.progress.notify_waiters();

        let gate = self.held.lock().unwrap().remove(product_id);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        Ok(cart)
    }
}
