use crate::dispatch::Courier;
use crate::events::{EventBus, EventListener};
use crate::kitchen::Kitchen;
use crate::model::{Order, ShelfSetStatus, ShelfType};
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Sends a courier for every order that lands on a shelf.
///
/// Each courier waits a random transit delay, drawn uniformly from the
/// configured range in whole seconds, then tries to collect the order.
/// Cancelling the token abandons every courier still in transit. A courier that
/// has already reached the kitchen finishes its pickup.
pub struct Dispatcher {
    kitchen: Arc<dyn Kitchen>,
    events: EventBus,
    min_delay_secs: u64,
    max_delay_secs: u64,
    cancel: CancellationToken,
    runtime: Handle,
    dispatched: AtomicU64,
}

impl Dispatcher {
    /// Must be called from within a Tokio runtime; couriers are spawned onto it.
    pub fn new(
        kitchen: Arc<dyn Kitchen>,
        events: EventBus,
        min_delay_secs: u64,
        max_delay_secs: u64,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            kitchen,
            events,
            min_delay_secs: min_delay_secs.min(max_delay_secs),
            max_delay_secs: max_delay_secs.max(min_delay_secs),
            cancel,
            runtime: Handle::current(),
            dispatched: AtomicU64::new(0),
        }
    }

    /// Number of couriers sent so far.
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    fn transit_delay(&self) -> Duration {
        let secs = rand::thread_rng().gen_range(self.min_delay_secs..=self.max_delay_secs);
        Duration::from_secs(secs)
    }

    /// Schedule a courier for `order`.
    pub fn dispatch(&self, order: &Order) -> JoinHandle<()> {
        let number = self.dispatched.fetch_add(1, Ordering::Relaxed) + 1;
        let courier = Courier::new(format!("courier-{number}"));
        let delay = self.transit_delay();
        let id = order.id.clone();
        let kitchen = self.kitchen.clone();
        let events = self.events.clone();
        let cancel = self.cancel.clone();

        info!(courier = courier.name(), order_id = %id, delay_secs = delay.as_secs(), "Courier dispatched");

        self.runtime.spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!(courier = courier.name(), order_id = %id, "Courier recalled");
                    return;
                }
                _ = tokio::time::sleep(delay) => {}
            }

            match courier.pickup(kitchen.as_ref(), &events, &id).await {
                Ok(outcome) => debug!(courier = courier.name(), ?outcome, "Courier finished"),
                Err(e) => error!(courier = courier.name(), order_id = %id, error = %e, "Pickup failed"),
            }
        })
    }
}

impl EventListener for Dispatcher {
    fn on_order_added_to_shelf(&self, order: &Order, _shelf: ShelfType, _status: &ShelfSetStatus) {
        self.dispatch(order);
    }
}
