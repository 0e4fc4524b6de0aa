#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Kitchen Simulation
//!
//! > **Perishable orders, bounded shelves, and couriers on a timer.**
//!
//! Orders arrive in Poisson-distributed batches, are placed on temperature-specific
//! shelves with limited room, lose value while they wait, and are collected by couriers
//! after a random transit delay. The interesting part is the shelf policy: where an
//! order goes when its shelf is full, what gets thrown away, and how that stays
//! correct while arrivals and pickups race each other.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### One owner for the shelves
//! The [`ShelfSet`](shelves::ShelfSet) is owned by a single [`KitchenActor`](kitchen::KitchenActor)
//! task. Arrivals and pickups are messages processed one at a time, so capacity checks
//! and moves between shelves can never interleave. No `Mutex` is needed around the shelves.
//!
//! ### Value is derived, never stored
//! An [`Order`](model::Order) records each shelf it has been placed on and when. Its value
//! is recomputed from that history on demand, so the overflow shelf's faster decay only
//! applies to the time actually spent there.
//!
//! ### Events as a closed enum
//! Every lifecycle notification is a [`KitchenEvent`](events::KitchenEvent) variant.
//! Listeners implement [`EventListener`](events::EventListener) and override only the hooks
//! they care about; one worker task delivers events in publish order.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Data ([`model`])
//! Temperatures, shelf types, orders and the decay model, plus the JSON status snapshot.
//!
//! ### 2. The Policy ([`shelves`])
//! A single [`Shelf`](shelves::Shelf) and the [`ShelfSet`](shelves::ShelfSet) that decides
//! between primary shelf, overflow, waste eviction and discard.
//!
//! ### 3. The Fabric ([`events`])
//! [`EventBus`](events::EventBus) with explicit [`Subscription`](events::Subscription) handles.
//!
//! ### 4. The Actors ([`kitchen`], [`dispatch`], [`arrival`])
//! - **Kitchen**: prepares orders and serves pickups.
//! - **Dispatcher**: one [`Courier`](dispatch::Courier) per shelved order.
//! - **Arrivals**: the periodic [`ArrivalGenerator`](arrival::ArrivalGenerator).
//!
//! ### 5. The Orchestrator ([`lifecycle`], [`config`], [`display`])
//! [`KitchenSimulation`](lifecycle::KitchenSimulation) wires everything from a
//! [`SimulationConfig`](config::SimulationConfig) and renders snapshots through
//! a [`StatusDisplay`](display::StatusDisplay).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Default settings, snapshots in the log
//! cargo run
//!
//! # Settings from a file, overridden from the environment
//! KITCHEN_LAMBDA=6 cargo run -- kitchen.toml
//! ```
//!
//! ## 🧪 Testing
//!
//! - [`events::mock::RecordingListener`] captures published events.
//! - [`kitchen::mock::MockKitchen`] scripts kitchen replies for couriers and generators.
//! - Time-driven tests run under `#[tokio::test(start_paused = true)]`.

pub mod arrival;
pub mod config;
pub mod dispatch;
pub mod display;
pub mod events;
pub mod kitchen;
pub mod lifecycle;
pub mod model;
pub mod shelves;
