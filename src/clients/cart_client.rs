//! # Cart Client
//!
//! High-level API for the [`cart_actor`](crate::cart_actor).

use crate::cart_actor::{CartRequest, ReplaceOutcome};
use crate::framework::{ActorHandle, FrameworkError};
use crate::model::RawCartEntry;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, instrument};

/// Client for interacting with the Cart actor.
#[derive(Clone)]
pub struct CartClient {
    inner: ActorHandle<CartRequest>,
    entries: watch::Receiver<Arc<Vec<RawCartEntry>>>,
}

impl CartClient {
    pub fn new(
        inner: ActorHandle<CartRequest>,
        entries: watch::Receiver<Arc<Vec<RawCartEntry>>>,
    ) -> Self {
        Self { inner, entries }
    }

    /// Hand a canonical cart, tagged with the sequence number of the request
    /// that produced it, to the actor.
    #[instrument(skip(self, entries), fields(size = entries.len()))]
    pub async fn replace(
        &self,
        seq: u64,
        entries: Vec<RawCartEntry>,
    ) -> Result<ReplaceOutcome, FrameworkError> {
        debug!("Sending request");
        self.inner
            .ask(|respond_to| CartRequest::Replace {
                seq,
                entries,
                respond_to,
            })
            .await
    }

    pub async fn snapshot(&self) -> Result<Arc<Vec<RawCartEntry>>, FrameworkError> {
        self.inner
            .ask(|respond_to| CartRequest::Snapshot { respond_to })
            .await
    }

    /// Receiver that sees every accepted replacement.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<RawCartEntry>>> {
        self.entries.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart_actor;

    #[tokio::test]
    async fn test_replace_and_snapshot_round_trip_through_actor() {
        let (actor, client) = cart_actor::new(8);
        let handle = tokio::spawn(actor.run(()));
        let mut updates = client.subscribe();

        let outcome = client
            .replace(1, vec![RawCartEntry::new("a", 2)])
            .await
            .unwrap();
        assert_eq!(outcome, ReplaceOutcome::Applied);

        updates.changed().await.unwrap();
        assert_eq!(updates.borrow().len(), 1);

        let stale = client.replace(1, Vec::new()).await.unwrap();
        assert_eq!(stale, ReplaceOutcome::Superseded { latest: 1 });

        let current = client.snapshot().await.unwrap();
        assert_eq!(*current, vec![RawCartEntry::new("a", 2)]);

        drop(updates);
        drop(client);
        handle.await.unwrap();
    }
}
