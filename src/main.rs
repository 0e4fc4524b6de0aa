//! # Kitchen Simulation
//!
//! Runs the simulation until Ctrl-C.
//!
//! ```bash
//! kitchen-sim [config.toml]
//! ```

use kitchen_sim::config::SimulationConfig;
use kitchen_sim::lifecycle::{setup_tracing, KitchenSimulation};
use std::path::PathBuf;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = SimulationConfig::load(config_path.as_deref()).map_err(|e| {
        error!(error = %e, "Invalid configuration");
        e.to_string()
    })?;

    let simulation = KitchenSimulation::start(config).map_err(|e| e.to_string())?;

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl-C");
    }
    info!("Ctrl-C received");

    simulation.stop().await.map_err(|e| e.to_string())?;
    info!("Application completed successfully");
    Ok(())
}
