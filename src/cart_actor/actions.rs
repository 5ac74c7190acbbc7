//! Messages for the Cart actor.

use crate::framework::Response;
use crate::model::RawCartEntry;
use std::sync::Arc;

#[derive(Debug)]
pub enum CartRequest {
    /// Replace the whole cart with a canonical list returned by the store,
    /// unless a response issued later has already been applied.
    Replace {
        seq: u64,
        entries: Vec<RawCartEntry>,
        respond_to: Response<ReplaceOutcome>,
    },
    /// Read the current cart.
    Snapshot {
        respond_to: Response<Arc<Vec<RawCartEntry>>>,
    },
}

/// What happened to a canonical cart handed to the Cart actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceOutcome {
    /// The list is now the local cart.
    Applied,
    /// A response from a more recently issued request was already applied;
    /// this one was dropped.
    Superseded { latest: u64 },
}
