//! # Mutation Coordinator
//!
//! The single entry point for everything that changes the cart.
//!
//! ## Entry points
//!
//! - [`MutationCoordinator::add_to_cart`] - the product card's "Add to cart".
//!   Refuses products already in the cart and always sends a quantity of 1.
//! - [`MutationCoordinator::adjust_quantity`] - the cart sidebar's +/- buttons.
//!   Sends the requested quantity, clamped at zero.
//! - [`MutationCoordinator::change_quantity`] - the general form both of the above use.
//! - [`MutationCoordinator::refresh`] - the initial cart fetch after login.
//!
//! ## Ordering
//!
//! The backend has no transactions, and every response is a full cart that
//! replaces the local one. Three mechanisms keep that safe:
//!
//! 1. A per-product lock is held from the duplicate check until the response
//!    has been handed to the Cart actor, so two "Add to cart" clicks for one
//!    product cannot both pass the check.
//! 2. Every fetch and upsert takes a sequence number when it is issued. The Cart
//!    actor refuses a response older than one it already applied, so a slow
//!    earlier response never overwrites the result of a later request.
//! 3. A refused response whose change is not visible in the applied cart means
//!    the server ran the two requests in the other order. The coordinator then
//!    fetches the cart again under a new sequence number.

pub mod error;
pub mod locks;

pub use error::*;
pub use locks::*;

use crate::cart_actor::ReplaceOutcome;
use crate::clients::CartClient;
use crate::model::{contains_product, qty_in, ProductId, Session};
use crate::notifier::Notifier;
use crate::store::CartStore;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// How [`MutationCoordinator::change_quantity`] treats the request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MutationOptions {
    /// Refuse the call if the product is already in the cart, and send a
    /// quantity of exactly 1 otherwise.
    pub prevent_duplicate: bool,
}

impl MutationOptions {
    /// Options used by the "Add to cart" entry point.
    pub const ADD: Self = Self {
        prevent_duplicate: true,
    };
    /// Options used by the quantity +/- entry point.
    pub const ADJUST: Self = Self {
        prevent_duplicate: false,
    };
}

/// Serializes cart mutations and republishes the canonical cart.
#[derive(Clone)]
pub struct MutationCoordinator {
    store: Arc<dyn CartStore>,
    cart: CartClient,
    notifier: Notifier,
    locks: ProductLocks,
    sequence: Arc<AtomicU64>,
}

impl MutationCoordinator {
    pub fn new(store: Arc<dyn CartStore>, cart: CartClient, notifier: Notifier) -> Self {
        Self {
            store,
            cart,
            notifier,
            locks: ProductLocks::new(),
            sequence: Arc::new(AtomicU64::new(0)),
        }
    }

    fn next_seq(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn fail<T>(&self, error: CartError) -> Result<T, CartError> {
        self.notifier.publish(error.notice());
        Err(error)
    }

    /// Set the quantity of `product_id` in the cart.
    ///
    /// # Errors
    /// - [`CartError::Unauthenticated`] when the session has no token. Nothing is sent.
    /// - [`CartError::DuplicateItem`] when `prevent_duplicate` is set and the
    ///   product already has a positive quantity. Nothing is sent.
    /// - [`CartError::ValidationRejected`] / [`CartError::Unreachable`] from the store.
    ///
    /// Every failure also publishes a [`Notice`](crate::model::Notice) and leaves
    /// the local cart untouched.
    ///
    /// Returns `Superseded` only when the newer cart already holds the quantity
    /// that was sent; otherwise the outcome of the follow-up fetch.
    #[instrument(skip(self, session))]
    pub async fn change_quantity(
        &self,
        session: &Session,
        product_id: &ProductId,
        desired_qty: i64,
        options: MutationOptions,
    ) -> Result<ReplaceOutcome, CartError> {
        if !session.is_authenticated() {
            warn!("Cart change without a session token");
            return self.fail(CartError::Unauthenticated);
        }

        let _guard = self.locks.lock(product_id).await;

        let qty = if options.prevent_duplicate {
            let current = self.cart.snapshot().await.map_err(CartError::from);
            let current = match current {
                Ok(current) => current,
                Err(e) => return self.fail(e),
            };
            if contains_product(&current, product_id) {
                info!("Already in cart, refusing add");
                return self.fail(CartError::DuplicateItem(product_id.clone()));
            }
            1
        } else {
            clamp_qty(desired_qty)
        };

        let seq = self.next_seq();
        debug!(seq, qty, "Sending upsert");
        let entries = match self.store.upsert(session, product_id, qty).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(seq, error = %e, "Upsert failed");
                return self.fail(e.into());
            }
        };

        let outcome = match self.cart.replace(seq, entries).await {
            Ok(outcome) => outcome,
            Err(e) => return self.fail(e.into()),
        };
        if let ReplaceOutcome::Superseded { latest } = outcome {
            let current = match self.cart.snapshot().await {
                Ok(current) => current,
                Err(e) => return self.fail(e.into()),
            };
            if qty_in(&current, product_id) != qty {
                info!(seq, latest, "Newer cart is missing this change, refetching");
                return self.resync(session).await;
            }
        }

        info!(seq, ?outcome, "Cart change done");
        Ok(outcome)
    }

    /// Fetches the server cart under a fresh sequence number. Used when the
    /// server applied two mutations in the opposite order to how they were issued.
    async fn resync(&self, session: &Session) -> Result<ReplaceOutcome, CartError> {
        match self.refresh(session).await? {
            Some(outcome) => Ok(outcome),
            None => self.fail(CartError::Unauthenticated),
        }
    }

    /// "Add to cart": adds one unit of a product that is not in the cart yet.
    pub async fn add_to_cart(
        &self,
        session: &Session,
        product_id: &ProductId,
    ) -> Result<ReplaceOutcome, CartError> {
        self.change_quantity(session, product_id, 1, MutationOptions::ADD)
            .await
    }

    /// Cart sidebar +/-: sets the quantity of a product, zero removes it.
    pub async fn adjust_quantity(
        &self,
        session: &Session,
        product_id: &ProductId,
        desired_qty: i64,
    ) -> Result<ReplaceOutcome, CartError> {
        self.change_quantity(session, product_id, desired_qty, MutationOptions::ADJUST)
            .await
    }

    /// Load the server-held cart into the Cart actor.
    ///
    /// Returns `Ok(None)` without any network call when the session has no token.
    #[instrument(skip_all)]
    pub async fn refresh(&self, session: &Session) -> Result<Option<ReplaceOutcome>, CartError> {
        let seq = self.next_seq();
        debug!(seq, user = ?session.username(), "Fetching cart");
        let entries = match self.store.fetch(session).await {
            Ok(Some(entries)) => entries,
            Ok(None) => {
                debug!("No session token, cart not fetched");
                return Ok(None);
            }
            Err(e) => {
                warn!(seq, error = %e, "Cart fetch failed");
                return self.fail(e.into());
            }
        };

        match self.cart.replace(seq, entries).await {
            Ok(outcome) => Ok(Some(outcome)),
            Err(e) => self.fail(e.into()),
        }
    }
}

fn clamp_qty(desired_qty: i64) -> u32 {
    u32::try_from(desired_qty.max(0)).unwrap_or(u32::MAX)
}
