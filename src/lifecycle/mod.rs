//! Simulation lifecycle and observability setup.
//!
//! - [`KitchenSimulation`] - starts, wires and stops every task of a run
//! - [`setup_tracing`] - initializes the tracing subscriber

pub mod simulation;
pub mod tracing;

pub use simulation::{KitchenSimulation, SimulationError};
pub use self::tracing::setup_tracing;
