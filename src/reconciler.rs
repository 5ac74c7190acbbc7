//! # Cart Reconciler
//!
//! Joins the raw cart against the displayed catalog and derives the totals.
//!
//! [`reconcile`] is a pure inner join on product id: entries whose product is
//! not in the catalog are dropped from the view without complaint (catalog
//! drift is expected, e.g. while a search filter is active). [`republish`] is
//! the task that re-runs the join whenever either input changes.

use crate::model::{CartItem, CartSummary, CartView, Product, ProductId, RawCartEntry};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info};

/// Flat shipping charge added to every order.
pub const SHIPPING_CHARGE: f64 = 0.0;

/// Enriches each entry with its product, keeping entry order. Unmatched entries are skipped.
pub fn reconcile(entries: &[RawCartEntry], products: &[Product]) -> Vec<CartItem> {
    let catalog: HashMap<&ProductId, &Product> =
        products.iter().map(|product| (&product.id, product)).collect();

    entries
        .iter()
        .filter_map(|entry| {
            let product = catalog.get(&entry.product_id)?;
            Some(CartItem {
                product_id: entry.product_id.clone(),
                qty: entry.qty,
                name: product.name.clone(),
                category: product.category.clone(),
                cost: product.cost,
                rating: product.rating,
                image_ref: product.image_ref.clone(),
            })
        })
        .collect()
}

/// Σ cost × qty.
pub fn total_value(items: &[CartItem]) -> f64 {
    items
        .iter()
        .map(|item| item.cost * f64::from(item.qty))
        .sum()
}

/// Σ qty.
pub fn total_qty(items: &[CartItem]) -> u64 {
    items.iter().map(|item| u64::from(item.qty)).sum()
}

pub fn summarize(items: &[CartItem]) -> CartSummary {
    let subtotal = total_value(items);
    CartSummary {
        total_qty: total_qty(items),
        subtotal,
        shipping: SHIPPING_CHARGE,
        total: subtotal + SHIPPING_CHARGE,
    }
}

pub fn build_view(entries: &[RawCartEntry], products: &[Product]) -> CartView {
    let items = reconcile(entries, products);
    let summary = summarize(&items);
    CartView { items, summary }
}

/// Recomputes the [`CartView`] from scratch every time the raw cart or the
/// catalog changes, until both inputs are closed.
pub async fn republish(
    mut entries: watch::Receiver<Arc<Vec<RawCartEntry>>>,
    mut products: watch::Receiver<Arc<Vec<Product>>>,
    view: watch::Sender<CartView>,
) {
    let mut entries_open = true;
    let mut products_open = true;

    loop {
        let current_entries = entries.borrow_and_update().clone();
        let current_products = products.borrow_and_update().clone();
        let next = build_view(&current_entries, &current_products);
        debug!(items = next.items.len(), total = next.summary.total, "Reconciled");
        view.send_if_modified(|published| {
            if *published == next {
                false
            } else {
                *published = next;
                true
            }
        });

        tokio::select! {
            changed = entries.changed(), if entries_open => entries_open = changed.is_ok(),
            changed = products.changed(), if products_open => products_open = changed.is_ok(),
            else => break,
        }
    }

    info!("Cart view publisher stopped");
}
