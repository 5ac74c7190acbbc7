//! Small actor toolkit the cart core is built on.
//!
//! Every stateful component (the displayed catalog, the local cart copy) is a
//! [`MailboxActor`] that owns its state and drains a bounded mailbox one request
//! at a time. Callers talk to it through a cloneable [`ActorHandle`].
//!
//! # Main Components
//!
//! - [`ActorState`] - Trait that the state owned by an actor implements
//! - [`MailboxActor`] - Generic run loop around an [`ActorState`]
//! - [`ActorHandle`] - Cloneable request/response client
//! - [`FrameworkError`] - Mailbox failures (actor gone, reply dropped)
//!
//! # Testing
//!
//! See [`mock`] for scripted stand-ins of the remote store traits.

pub mod actor;
pub mod client;
pub mod error;
pub mod message;
pub mod mock;
pub mod state;

pub use actor::MailboxActor;
pub use client::ActorHandle;
pub use error::FrameworkError;
pub use message::Response;
pub use state::ActorState;
