//! Type-safe wrappers around [`ActorHandle`](crate::framework::ActorHandle).

pub mod cart_client;
pub mod catalog_client;

pub use cart_client::*;
pub use catalog_client::*;
