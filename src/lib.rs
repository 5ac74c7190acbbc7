//! # cart-sync
//!
//! > **A consistent shopping cart on top of a backend that has no transactions.**
//!
//! The authoritative cart lives in a remote store that offers two calls: read the
//! cart, and set the quantity of one product (which answers with the complete new
//! cart). This crate keeps a local, enriched view of that cart in step with the
//! product catalog and makes sure overlapping "Add to cart" and quantity clicks
//! cannot leave it wrong.
//!
//! ## 🏗️ Design
//!
//! ### State lives in actors
//! The displayed catalog and the local copy of the raw cart are each owned by a
//! single Tokio task ([`catalog_actor`], [`cart_actor`]) that processes its mailbox
//! in order. Nobody else writes them, and every write is a full replacement.
//!
//! ### Mutations are serialized and sequenced
//! The [`coordinator`] takes a per-product lock across the "is it already in the
//! cart?" check and the write that follows, and tags every request with a
//! sequence number. The Cart actor throws away any response older than one it has
//! already applied.
//!
//! ### The view is derived, never stored
//! [`reconciler::republish`] re-joins the raw cart with the current catalog
//! whenever either changes and publishes a [`CartView`](model::CartView) on a
//! `watch` channel. Cart entries whose product is not in the catalog are simply
//! left out.
//!
//! ### Errors stay typed
//! Each layer has its own `thiserror` enum ([`store::StoreError`],
//! [`coordinator::CartError`], [`catalog_actor::CatalogError`],
//! [`framework::FrameworkError`]). Failures that a user should see are also
//! broadcast as [`Notice`](model::Notice)s through the [`notifier`].
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic mailbox actor, its handle, and the scripted store mocks.
//! - **Key items**: [`MailboxActor`](framework::MailboxActor), [`ActorState`](framework::ActorState).
//!
//! ### 2. The Orchestrator ([`lifecycle`])
//! Spawns and wires everything, and shuts it down again.
//! - **Key items**: [`CartSystem`](lifecycle::CartSystem), [`setup_tracing`](lifecycle::setup_tracing).
//!
//! ### 3. The Interface ([`clients`], [`coordinator`], [`debounce`])
//! What the presentation layer calls.
//! - **Key items**: [`MutationCoordinator`](coordinator::MutationCoordinator),
//!   [`SearchDebounce`](debounce::SearchDebounce), [`CatalogClient`](clients::CatalogClient).
//!
//! ### 4. The Edges ([`store`], [`config`])
//! The remote API and where its address comes from.
//! - **Key items**: [`CartStore`](store::CartStore), [`CatalogSource`](store::CatalogSource),
//!   [`HttpBackend`](store::HttpBackend), [`Settings`](config::Settings).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! export CART_SYNC__ENDPOINT=http://127.0.0.1:8082/api/v1
//! export CART_SYNC_TOKEN=...
//! RUST_LOG=info cargo run -- add v4sLtEcMpzabRyfx
//! RUST_LOG=info cargo run -- cart
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod cart_actor;
pub mod catalog_actor;
pub mod clients;
pub mod config;
pub mod coordinator;
pub mod debounce;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod notifier;
pub mod reconciler;
pub mod store;
