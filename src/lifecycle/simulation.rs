use crate::arrival::{ArrivalGenerator, OrderCatalog, OrderSource};
use crate::config::{ConfigError, OrderSourceKind, SimulationConfig};
use crate::dispatch::Dispatcher;
use crate::display::StatusDisplay;
use crate::events::{EventBus, EventListener, Subscription, SubscriptionId};
use crate::kitchen::{KitchenActor, KitchenClient};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Simulation task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

/// A running kitchen: event bus, kitchen actor, dispatcher, display and the
/// arrival generator, wired together.
///
/// # Example
///
/// ```ignore
/// let simulation = KitchenSimulation::start(SimulationConfig::default())?;
/// tokio::time::sleep(Duration::from_secs(30)).await;
/// simulation.stop().await?;
/// ```
pub struct KitchenSimulation {
    kitchen: KitchenClient,
    events: EventBus,
    dispatcher: Arc<Dispatcher>,
    cancel: CancellationToken,
    subscriptions: Vec<Subscription>,
    /// Arrival generator and waste sweep; both stop on cancellation.
    workers: Vec<JoinHandle<()>>,
    kitchen_handle: JoinHandle<()>,
    bus_handle: JoinHandle<()>,
}

impl KitchenSimulation {
    /// Validates `config` and starts every task. Must be called inside a Tokio runtime.
    pub fn start(config: SimulationConfig) -> Result<Self, SimulationError> {
        let source = match config.order_source {
            OrderSourceKind::Random => OrderSource::Random,
            OrderSourceKind::Catalog => OrderSource::Catalog(match &config.catalog_path {
                Some(path) => OrderCatalog::load_or_empty(path),
                None => OrderCatalog::builtin(),
            }),
        };
        Self::start_with_source(config, source)
    }

    /// Like [`KitchenSimulation::start`] with an explicit order source.
    pub fn start_with_source(
        config: SimulationConfig,
        source: OrderSource,
    ) -> Result<Self, SimulationError> {
        let config = config.validated()?;
        info!(?config, "Starting kitchen simulation");

        let cancel = CancellationToken::new();
        let (events, bus_handle) = EventBus::start();

        let (kitchen_actor, kitchen) = KitchenActor::new(config.kitchen_buffer, events.clone());
        let kitchen_handle = tokio::spawn(kitchen_actor.run());

        let dispatcher = Arc::new(Dispatcher::new(
            Arc::new(kitchen.clone()),
            events.clone(),
            config.transit_delay_min_secs,
            config.transit_delay_max_secs,
            cancel.clone(),
        ));

        let mut simulation = Self {
            kitchen: kitchen.clone(),
            events,
            dispatcher: dispatcher.clone(),
            cancel: cancel.clone(),
            subscriptions: Vec::new(),
            workers: Vec::new(),
            kitchen_handle,
            bus_handle,
        };

        simulation.subscribe(dispatcher);
        if let Some(display) = StatusDisplay::for_target(config.display, config.display_file.clone()) {
            simulation.subscribe(Arc::new(display));
        }

        if let Some(period) = config.waste_sweep() {
            simulation
                .workers
                .push(spawn_waste_sweep(kitchen.clone(), period, cancel.clone()));
        }

        let generator = ArrivalGenerator::new(
            Arc::new(kitchen),
            source,
            config.poisson,
            config.lambda,
            config.tick(),
        );
        simulation.workers.push(tokio::spawn(generator.run(cancel)));

        info!("Kitchen simulation running");
        Ok(simulation)
    }

    pub fn kitchen(&self) -> &KitchenClient {
        &self.kitchen
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Registers a listener for the lifetime of the simulation.
    pub fn subscribe(&mut self, listener: Arc<dyn EventListener>) -> SubscriptionId {
        let subscription = self.events.subscribe(listener);
        let id = subscription.id();
        self.subscriptions.push(subscription);
        id
    }

    /// Halts arrivals and recalls couriers still in transit, then shuts the
    /// kitchen and the bus down. Pending work is not drained.
    pub async fn stop(self) -> Result<(), SimulationError> {
        info!("Stopping kitchen simulation...");
        self.cancel.cancel();

        let mut failure = None;
        for handle in self.workers {
            if let Err(e) = handle.await {
                error!(error = %e, "Simulation worker failed");
                failure = failure.or(Some(e));
            }
        }

        for subscription in self.subscriptions {
            self.events.unsubscribe(subscription);
        }

        if let Err(e) = self.kitchen.shutdown().await {
            warn!(error = %e, "Kitchen already stopped");
        }
        drop(self.kitchen);
        if let Err(e) = self.kitchen_handle.await {
            error!(error = %e, "Kitchen task failed");
            failure = failure.or(Some(e));
        }

        self.events.shutdown();
        if let Err(e) = self.bus_handle.await {
            error!(error = %e, "Event bus task failed");
            failure = failure.or(Some(e));
        }

        match failure {
            Some(e) => Err(e.into()),
            None => {
                info!("Kitchen simulation stopped");
                Ok(())
            }
        }
    }
}

fn spawn_waste_sweep(
    kitchen: KitchenClient,
    period: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = interval.tick() => {
                    if let Err(e) = kitchen.sweep_waste().await {
                        warn!(error = %e, "Kitchen unavailable, stopping waste sweep");
                        break;
                    }
                }
            }
        }
    })
}
