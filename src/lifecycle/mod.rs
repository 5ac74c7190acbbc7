//! Runtime orchestration and lifecycle management.
//!
//! - [`CartSystem`] - spawns the actors and the view publisher, wires them to
//!   the remote store, and shuts them down again
//! - [`setup_tracing`] - installs the log subscriber

pub mod cart_system;
pub mod tracing;

pub use cart_system::*;
pub use self::tracing::*;
