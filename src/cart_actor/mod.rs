//! # Cart Actor
//!
//! Owns the local copy of the server-held cart, the only shared mutable
//! resource in the crate.
//!
//! The copy is never edited in place. Every accepted fetch or mutation response
//! swaps in the complete list at once, so readers see either the old cart or
//! the new one. Each replacement carries the sequence number its request was
//! issued with; a response older than the last applied one is discarded
//! instead of clobbering newer state.

pub mod actions;
pub mod state;

pub use actions::*;
pub use state::*;

use crate::clients::CartClient;
use crate::framework::MailboxActor;

/// Creates a new Cart actor and its client.
pub fn new(buffer_size: usize) -> (MailboxActor<CartState>, CartClient) {
    let (state, entries) = CartState::new();
    let (actor, handle) = MailboxActor::new(state, buffer_size);
    (actor, CartClient::new(handle, entries))
}
