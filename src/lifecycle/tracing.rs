//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered
//! by `RUST_LOG`. Module paths are hidden (`with_target(false)`); actors log an
//! `actor_type` field instead.
//!
//! ```bash
//! RUST_LOG=info cart-sync cart       # replacements, notices, actor lifecycle
//! RUST_LOG=debug cart-sync add p1    # plus every request and sequence number
//! ```
//!
//! With `RUST_LOG=info` an "Add to cart" reads roughly:
//!
//! ```text
//! INFO Actor started actor_type="CartState"
//! INFO change_quantity: Cart replaced seq=2 size=1
//! INFO change_quantity: Cart change done seq=2 outcome=Applied
//! ```
//!
//! A response that lost the race shows up as a warning with both sequence numbers:
//!
//! ```text
//! WARN replace: Discarding stale cart response seq=3 latest=4
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
