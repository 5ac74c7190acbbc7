//! Pure data structures shared by the actors, the store clients and the reconciler.

pub mod cart;
pub mod notice;
pub mod product;
pub mod session;

pub use cart::*;
pub use notice::*;
pub use product::*;
pub use session::*;
