use crate::arrival::{OrderSource, PoissonStrategy};
use crate::kitchen::{Kitchen, KitchenError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Feeds the kitchen a Poisson-distributed batch of new orders on every tick.
pub struct ArrivalGenerator {
    kitchen: Arc<dyn Kitchen>,
    source: OrderSource,
    strategy: PoissonStrategy,
    lambda: f64,
    tick: Duration,
    rng: StdRng,
}

impl ArrivalGenerator {
    pub fn new(
        kitchen: Arc<dyn Kitchen>,
        source: OrderSource,
        strategy: PoissonStrategy,
        lambda: f64,
        tick: Duration,
    ) -> Self {
        Self {
            kitchen,
            source,
            strategy,
            lambda,
            tick,
            rng: StdRng::from_entropy(),
        }
    }

    /// Use a fixed seed so batch sizes and templates are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Draws one batch and submits it. Returns how many orders were submitted.
    pub async fn tick_once(&mut self) -> Result<usize, KitchenError> {
        let count = self.strategy.sample(self.lambda, &mut self.rng);
        info!(count, "Generating new orders");

        let mut submitted = 0;
        for _ in 0..count {
            let Some(request) = self.source.next_request(&mut self.rng) else {
                warn!("Order source is empty, skipping the rest of this batch");
                break;
            };
            self.kitchen.receive_order(request).await?;
            submitted += 1;
        }

        info!(submitted, "Added new orders to the kitchen");
        Ok(submitted)
    }

    /// Ticks immediately and then once per period until `cancel` fires or the
    /// kitchen goes away.
    pub async fn run(mut self, cancel: CancellationToken) {
        info!(lambda = self.lambda, strategy = ?self.strategy, tick_ms = self.tick.as_millis() as u64, "Arrival generator started");

        let mut interval = tokio::time::interval(self.tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Arrival generator cancelled");
                    break;
                }
                _ = interval.tick() => {
                    if let Err(e) = self.tick_once().await {
                        error!(error = %e, "Kitchen unavailable, stopping arrivals");
                        break;
                    }
                }
            }
        }

        info!("Arrival generator stopped");
    }
}
