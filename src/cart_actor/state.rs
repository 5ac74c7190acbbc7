use super::{CartRequest, ReplaceOutcome};
use crate::framework::ActorState;
use crate::model::RawCartEntry;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

/// The local cart plus the sequence number of the response it came from.
pub struct CartState {
    entries: Arc<Vec<RawCartEntry>>,
    applied_seq: u64,
    publisher: watch::Sender<Arc<Vec<RawCartEntry>>>,
}

impl CartState {
    /// Returns the empty initial state and a receiver that observes every replacement.
    pub fn new() -> (Self, watch::Receiver<Arc<Vec<RawCartEntry>>>) {
        let entries = Arc::new(Vec::new());
        let (publisher, receiver) = watch::channel(Arc::clone(&entries));
        let state = Self {
            entries,
            applied_seq: 0,
            publisher,
        };
        (state, receiver)
    }

    fn replace(&mut self, seq: u64, entries: Vec<RawCartEntry>) -> ReplaceOutcome {
        if seq <= self.applied_seq {
            warn!(seq, latest = self.applied_seq, "Discarding stale cart response");
            return ReplaceOutcome::Superseded {
                latest: self.applied_seq,
            };
        }

        self.entries = Arc::new(entries);
        self.applied_seq = seq;
        self.publisher.send_replace(Arc::clone(&self.entries));
        info!(seq, size = self.entries.len(), "Cart replaced");
        ReplaceOutcome::Applied
    }
}

#[async_trait]
impl ActorState for CartState {
    type Request = CartRequest;
    type Context = ();

    async fn handle(&mut self, request: CartRequest, _ctx: &()) {
        match request {
            CartRequest::Replace {
                seq,
                entries,
                respond_to,
            } => {
                let _ = respond_to.send(self.replace(seq, entries));
            }
            CartRequest::Snapshot { respond_to } => {
                let _ = respond_to.send(Arc::clone(&self.entries));
            }
        }
    }

    fn on_shutdown(&mut self) {
        info!(seq = self.applied_seq, size = self.entries.len(), "Cart closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_sequence_replaces_wholesale() {
        let (mut state, receiver) = CartState::new();

        let outcome = state.replace(1, vec![RawCartEntry::new("a", 1), RawCartEntry::new("b", 2)]);
        assert_eq!(outcome, ReplaceOutcome::Applied);

        let outcome = state.replace(2, vec![RawCartEntry::new("b", 3)]);
        assert_eq!(outcome, ReplaceOutcome::Applied);
        assert_eq!(**receiver.borrow(), vec![RawCartEntry::new("b", 3)]);
    }

    #[test]
    fn test_stale_sequence_is_discarded() {
        let (mut state, receiver) = CartState::new();

        state.replace(5, vec![RawCartEntry::new("a", 2)]);
        let outcome = state.replace(3, vec![RawCartEntry::new("a", 7)]);

        assert_eq!(outcome, ReplaceOutcome::Superseded { latest: 5 });
        assert_eq!(**receiver.borrow(), vec![RawCartEntry::new("a", 2)]);

        let repeated = state.replace(5, Vec::new());
        assert_eq!(repeated, ReplaceOutcome::Superseded { latest: 5 });
    }
}
