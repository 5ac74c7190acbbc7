//! # Messages
//!
//! Requests carry their own reply channel. Each actor defines a request enum
//! whose variants end in a `respond_to: Response<T>` field.

use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<T>;
