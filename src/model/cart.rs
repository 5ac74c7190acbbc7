use serde::{Deserialize, Serialize};

use super::product::ProductId;

/// One `(productId, qty)` record of the server-held cart.
///
/// The remote store owns these. Every successful fetch or upsert returns the
/// complete list, which replaces the local copy wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCartEntry {
    pub product_id: ProductId,
    pub qty: u32,
}

impl RawCartEntry {
    pub fn new(product_id: impl Into<ProductId>, qty: u32) -> Self {
        Self {
            product_id: product_id.into(),
            qty,
        }
    }
}

/// A cart entry enriched with the product data it refers to.
///
/// Derived by [`reconcile`](crate::reconciler::reconcile); never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,
    pub qty: u32,
    pub name: String,
    pub category: String,
    pub cost: f64,
    pub rating: u8,
    #[serde(rename = "image")]
    pub image_ref: String,
}

/// Totals shown alongside the cart and on the checkout summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub total_qty: u64,
    pub subtotal: f64,
    pub shipping: f64,
    pub total: f64,
}

/// What the presentation layer renders: the reconciled items and their totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub summary: CartSummary,
}

impl CartView {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn qty_of(&self, product_id: &ProductId) -> Option<u32> {
        self.items
            .iter()
            .find(|item| &item.product_id == product_id)
            .map(|item| item.qty)
    }
}

/// Returns true if `entries` holds a positive quantity of `product_id`.
pub fn contains_product(entries: &[RawCartEntry], product_id: &ProductId) -> bool {
    entries
        .iter()
        .any(|entry| &entry.product_id == product_id && entry.qty > 0)
}

/// Quantity of `product_id` in `entries`; 0 when it has no entry.
pub fn qty_in(entries: &[RawCartEntry], product_id: &ProductId) -> u32 {
    entries
        .iter()
        .find(|entry| &entry.product_id == product_id)
        .map_or(0, |entry| entry.qty)
}
