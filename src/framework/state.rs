//! # ActorState Trait
//!
//! The contract between a piece of owned state and the generic [`MailboxActor`](super::MailboxActor).
//! The actor loop handles the plumbing (mailbox, logging, shutdown); the state
//! only decides what a request does.

use async_trait::async_trait;
use std::fmt::Debug;

/// State owned exclusively by one actor task.
///
/// # Async & Context
/// `handle` is async so a request can await remote calls. The `Context` holds
/// dependencies injected when the actor is started (late binding), so the state
/// can be constructed before its collaborators exist.
#[async_trait]
pub trait ActorState: Send + 'static {
    /// The request enum this actor understands.
    type Request: Send + Debug + 'static;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync + 'static;

    /// Handle a single request. Replies go through the request's `respond_to`.
    async fn handle(&mut self, request: Self::Request, ctx: &Self::Context);

    /// Called once after the mailbox closes.
    fn on_shutdown(&mut self) {}
}
