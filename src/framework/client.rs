//! # Generic Client
//!
//! The handle used to talk to a [`MailboxActor`](super::MailboxActor).

use crate::framework::error::FrameworkError;
use crate::framework::message::Response;
use tokio::sync::{mpsc, oneshot};

/// A cloneable sender for one actor's request enum.
///
/// Holds only the mailbox sender, so cloning is cheap. Domain-specific clients
/// (e.g. [`CatalogClient`](crate::clients::CatalogClient)) wrap it and expose typed methods.
pub struct ActorHandle<R> {
    sender: mpsc::Sender<R>,
}

impl<R> Clone for ActorHandle<R> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<R: Send + 'static> ActorHandle<R> {
    pub fn new(sender: mpsc::Sender<R>) -> Self {
        Self { sender }
    }

    /// Sends the request built by `build` and waits for its reply.
    pub async fn ask<T>(&self, build: impl FnOnce(Response<T>) -> R) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}
