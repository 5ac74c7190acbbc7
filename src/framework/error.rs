//! # Framework Errors
//!
//! Failures of the mailbox plumbing itself, as opposed to domain failures which
//! travel inside the response payload.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
}
