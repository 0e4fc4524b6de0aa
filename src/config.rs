//! # Simulation Configuration
//!
//! Settings are read from an optional TOML file, then overridden by
//! `KITCHEN_`-prefixed environment variables (`KITCHEN_LAMBDA=5`,
//! `KITCHEN_DISPLAY=print`, ...). Anything left unset keeps its default.
//!
//! ```toml
//! lambda = 3.25
//! transit_delay_min_secs = 2
//! transit_delay_max_secs = 10
//! poisson = "knuth"
//! display = "file"
//! display_file = "output.json"
//! order_source = "catalog"
//! waste_sweep_secs = 5
//! ```

use crate::arrival::{PoissonStrategy, KNUTH_MAX_LAMBDA};
use crate::display::DisplayTarget;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Lower bound for the arrival rate.
pub const MIN_LAMBDA: f64 = 1.0;

const ENV_PREFIX: &str = "KITCHEN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Transit delay range is empty: min {min}s > max {max}s")]
    InvalidDelayRange { min: u64, max: u64 },

    #[error("Tick period must be at least 1 ms")]
    ZeroTick,
}

/// Which generator feeds the kitchen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSourceKind {
    /// Templates from `catalog_path`, or the bundled catalog when unset.
    #[default]
    Catalog,
    Random,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Mean orders per tick.
    pub lambda: f64,
    pub transit_delay_min_secs: u64,
    pub transit_delay_max_secs: u64,
    pub poisson: PoissonStrategy,
    pub display: DisplayTarget,
    pub display_file: PathBuf,
    pub order_source: OrderSourceKind,
    pub catalog_path: Option<PathBuf>,
    pub tick_millis: u64,
    /// Evict waste from every shelf on this period. Off when unset.
    pub waste_sweep_secs: Option<u64>,
    /// Capacity of the kitchen's request queue.
    pub kitchen_buffer: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            lambda: 3.25,
            transit_delay_min_secs: 2,
            transit_delay_max_secs: 10,
            poisson: PoissonStrategy::Knuth,
            display: DisplayTarget::Log,
            display_file: PathBuf::from("output.json"),
            order_source: OrderSourceKind::Catalog,
            catalog_path: None,
            tick_millis: 1_000,
            waste_sweep_secs: None,
            kitchen_buffer: 256,
        }
    }
}

impl SimulationConfig {
    /// Load from `path` (if given) and the environment, then validate.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        let settings = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        settings.try_deserialize::<SimulationConfig>()?.validated()
    }

    /// Clamps the arrival rate and rejects settings the simulation cannot run with.
    ///
    /// Rates too large for the Knuth sampler switch it to [`PoissonStrategy::Linear`].
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        if self.lambda.is_nan() || self.lambda < MIN_LAMBDA {
            warn!(lambda = self.lambda, min = MIN_LAMBDA, "Arrival rate too low, clamping");
            self.lambda = MIN_LAMBDA;
        }
        if self.poisson == PoissonStrategy::Knuth && self.lambda >= KNUTH_MAX_LAMBDA {
            warn!(
                lambda = self.lambda,
                max = KNUTH_MAX_LAMBDA,
                "Arrival rate too high for the knuth sampler, using linear"
            );
            self.poisson = PoissonStrategy::Linear;
        }
        if self.transit_delay_min_secs > self.transit_delay_max_secs {
            return Err(ConfigError::InvalidDelayRange {
                min: self.transit_delay_min_secs,
                max: self.transit_delay_max_secs,
            });
        }
        if self.tick_millis == 0 {
            return Err(ConfigError::ZeroTick);
        }
        Ok(self)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }

    pub fn waste_sweep(&self) -> Option<Duration> {
        self.waste_sweep_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}
