//! # Catalog Actor
//!
//! Owns the product list currently on display, either the full catalog or the
//! result of the last search.
//!
//! ## Structure
//!
//! - [`actions`] - [`CatalogRequest`], the messages the actor understands
//! - [`state`] - [`CatalogState`], the request handling
//! - [`error`] - [`CatalogError`]
//! - [`new()`] - Factory function that creates the actor and its client
//!
//! ## Ordering
//!
//! Requests run one after another, each awaiting its remote call before the next
//! starts. A restore queued behind a slow search therefore always lands last.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let (actor, catalog) = catalog_actor::new(32);
//! tokio::spawn(actor.run(source)); // Arc<dyn CatalogSource>
//!
//! catalog.show_all().await?;
//! catalog.search("phone").await?;
//! ```

pub mod actions;
pub mod error;
pub mod state;

pub use actions::*;
pub use error::*;
pub use state::*;

use crate::clients::CatalogClient;
use crate::framework::MailboxActor;

/// Creates a new Catalog actor and its client.
pub fn new(buffer_size: usize) -> (MailboxActor<CatalogState>, CatalogClient) {
    let (state, products) = CatalogState::new();
    let (actor, handle) = MailboxActor::new(state, buffer_size);
    (actor, CatalogClient::new(handle, products))
}
