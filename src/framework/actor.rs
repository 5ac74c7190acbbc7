//! # Generic Mailbox Actor
//!
//! The "server" half of every actor in the crate. It owns the state and the
//! receiving end of the mailbox and processes requests strictly in arrival order.

use crate::framework::client::ActorHandle;
use crate::framework::state::ActorState;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Runs an [`ActorState`] inside its own task.
///
/// **Concurrency Model**:
/// Requests are handled one at a time, so the state needs no `Mutex`. A request
/// that awaits a remote call holds up the requests queued behind it, which is
/// exactly what gives the catalog its "last request wins" ordering.
///
/// # Usage Pattern
///
/// 1.  **Create**: `MailboxActor::new(state, capacity)` returns the actor and its handle.
/// 2.  **Wire & Run**: spawn `actor.run(context)` with the dependencies it needs.
/// 3.  **Use**: clone the handle freely; dropping every handle stops the actor.
pub struct MailboxActor<S: ActorState> {
    receiver: mpsc::Receiver<S::Request>,
    state: S,
}

impl<S: ActorState> MailboxActor<S> {
    /// Creates a new actor and its associated [`ActorHandle`].
    ///
    /// # Arguments
    ///
    /// * `state` - The state the actor will own.
    /// * `buffer_size` - Mailbox capacity. When it is full, senders wait.
    pub fn new(state: S, buffer_size: usize) -> (Self, ActorHandle<S::Request>) {
        let (sender, receiver) = mpsc::channel(buffer_size.max(1));
        let actor = Self { receiver, state };
        (actor, ActorHandle::new(sender))
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    pub async fn run(mut self, context: S::Context) {
        // Extract just the type name (e.g., "CartState" instead of "cart_sync::cart_actor::state::CartState")
        let actor_type = std::any::type_name::<S>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(actor_type, "Actor started");

        while let Some(request) = self.receiver.recv().await {
            debug!(actor_type, ?request, "Request");
            self.state.handle(request, &context).await;
        }

        self.state.on_shutdown();
        info!(actor_type, "Shutdown");
    }
}
