//! Per-product async locks.

use crate::model::ProductId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// One async mutex per product id, created on first use.
///
/// Slots nobody holds or waits on are pruned whenever a new lock is taken, so
/// the map only grows with the number of products in flight.
#[derive(Debug, Clone, Default)]
pub struct ProductLocks {
    slots: Arc<Mutex<HashMap<ProductId, Arc<AsyncMutex<()>>>>>,
}

impl ProductLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no other caller holds the lock for `product_id`.
    pub async fn lock(&self, product_id: &ProductId) -> OwnedMutexGuard<()> {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            slots.retain(|_, slot| Arc::strong_count(slot) > 1);
            Arc::clone(slots.entry(product_id.clone()).or_default())
        };
        slot.lock_owned().await
    }

    pub fn tracked(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_product_waits_other_product_does_not() {
        let locks = ProductLocks::new();
        let a = ProductId::from("a");
        let b = ProductId::from("b");

        let held = locks.lock(&a).await;

        let blocked = tokio::time::timeout(Duration::from_millis(20), locks.lock(&a)).await;
        assert!(blocked.is_err());

        let other = tokio::time::timeout(Duration::from_millis(20), locks.lock(&b)).await;
        assert!(other.is_ok());

        drop(held);
        let reacquired = tokio::time::timeout(Duration::from_millis(20), locks.lock(&a)).await;
        assert!(reacquired.is_ok());
    }

    #[tokio::test]
    async fn test_idle_slots_are_pruned() {
        let locks = ProductLocks::new();
        drop(locks.lock(&ProductId::from("a")).await);
        drop(locks.lock(&ProductId::from("b")).await);

        // taking "c" prunes the idle "a" and "b"
        let _held = locks.lock(&ProductId::from("c")).await;
        assert_eq!(locks.tracked(), 1);
    }
}
