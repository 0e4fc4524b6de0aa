//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing` subscriber for the whole simulation.
//! Module paths are hidden (`with_target(false)`); structured fields such as
//! `order_id`, `shelf` and `courier` identify what each line is about.
//!
//! ## Configuration
//!
//! The level comes from `RUST_LOG` and defaults to `info`:
//!
//! ```bash
//! # Arrivals, placements, pickups and discards
//! cargo run
//!
//! # Also client requests, sweeps and bus subscriptions
//! RUST_LOG=debug cargo run
//!
//! # Only the shelf policy
//! RUST_LOG=kitchen_sim::shelves=debug cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! - **Kitchen**: orders received, prepared and shelved
//! - **Shelves**: overflow spills, waste eviction, rearrangement and discards (`ERROR`)
//! - **Couriers**: dispatch with the sampled transit delay, pickup and delivery
//! - **Lifecycle**: actor, bus and generator startup and shutdown
//!
//! With `RUST_LOG=info` a single order reads:
//!
//! ```text
//! INFO Order received name="Pho" temperature=HOT
//! INFO Order prepared order_id=4f1c... name="Pho"
//! INFO Adding order to shelves order_id=4f1c... temperature=HOT
//! INFO Courier dispatched courier="courier-12" order_id=4f1c... delay_secs=6
//! INFO Order picked up courier="courier-12" order_id=4f1c... value=208
//! INFO Order delivered courier="courier-12" order_id=4f1c...
//! ```

use tracing_subscriber::EnvFilter;

pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
