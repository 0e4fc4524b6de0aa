//! # Event Bus
//!
//! A publish/subscribe hub with a single dedicated worker. The [`EventBus`] handle is
//! the *client* half: cheap to clone and passed to every component that publishes or
//! subscribes. The [`EventWorker`] is the *server* half: it owns the listener registry
//! and delivers events one at a time.
//!
//! Because registration, removal and publication all travel down the same channel,
//! a listener sees exactly the events published after its `subscribe` call and before
//! its `unsubscribe` call, in publish order.

use crate::events::{BusError, EventListener, KitchenEvent};
use std::fmt::Display;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Identifies one registration on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

impl Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "subscription_{}", self.0)
    }
}

/// Registration handle returned by [`EventBus::subscribe`].
///
/// The bus keeps the listener alive until this handle is passed back to
/// [`EventBus::unsubscribe`].
#[must_use = "dropping a Subscription leaves the listener registered; pass it to EventBus::unsubscribe"]
#[derive(Debug, PartialEq, Eq)]
pub struct Subscription {
    id: SubscriptionId,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }
}

/// Internal message type sent to the worker.
enum BusRequest {
    Subscribe {
        id: SubscriptionId,
        listener: Arc<dyn EventListener>,
    },
    Unsubscribe {
        id: SubscriptionId,
    },
    Publish(KitchenEvent),
    Flush {
        respond_to: oneshot::Sender<()>,
    },
    Shutdown,
}

/// Handle to the bus. Publishing never blocks the caller.
#[derive(Clone)]
pub struct EventBus {
    sender: mpsc::UnboundedSender<BusRequest>,
    next_id: Arc<AtomicU64>,
}

impl EventBus {
    /// Creates the bus handle and the worker that must be driven with [`EventWorker::run`].
    pub fn new() -> (EventWorker, EventBus) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let worker = EventWorker {
            receiver,
            listeners: Vec::new(),
        };
        let bus = EventBus {
            sender,
            next_id: Arc::new(AtomicU64::new(1)),
        };
        (worker, bus)
    }

    /// Creates the bus and spawns its worker on the current runtime.
    pub fn start() -> (EventBus, JoinHandle<()>) {
        let (worker, bus) = Self::new();
        let handle = tokio::spawn(worker.run());
        (bus, handle)
    }

    pub fn subscribe(&self, listener: Arc<dyn EventListener>) -> Subscription {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        if self
            .sender
            .send(BusRequest::Subscribe { id, listener })
            .is_err()
        {
            debug!(%id, "Bus closed, subscription ignored");
        }
        Subscription { id }
    }

    pub fn unsubscribe(&self, subscription: Subscription) {
        let id = subscription.id;
        if self.sender.send(BusRequest::Unsubscribe { id }).is_err() {
            debug!(%id, "Bus closed, nothing to unsubscribe");
        }
    }

    /// Queues `event` for delivery to every registered listener.
    pub fn publish(&self, event: KitchenEvent) {
        if let Err(mpsc::error::SendError(BusRequest::Publish(event))) =
            self.sender.send(BusRequest::Publish(event))
        {
            debug!(kind = ?event.kind(), "Bus closed, event dropped");
        }
    }

    /// Resolves once every event published before this call has been delivered.
    pub async fn flush(&self) -> Result<(), BusError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(BusRequest::Flush { respond_to })
            .map_err(|_| BusError::BusClosed)?;
        response.await.map_err(|_| BusError::WorkerDropped)
    }

    /// Stops the worker once it reaches this request. Later publications are dropped.
    pub fn shutdown(&self) {
        let _ = self.sender.send(BusRequest::Shutdown);
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// The worker half of the bus: owns the listener registry.
pub struct EventWorker {
    receiver: mpsc::UnboundedReceiver<BusRequest>,
    listeners: Vec<(SubscriptionId, Arc<dyn EventListener>)>,
}

impl EventWorker {
    /// Processes bus requests until shutdown or until every handle is dropped.
    pub async fn run(mut self) {
        info!("Event bus started");

        while let Some(request) = self.receiver.recv().await {
            match request {
                BusRequest::Subscribe { id, listener } => {
                    self.listeners.push((id, listener));
                    debug!(%id, listeners = self.listeners.len(), "Subscribed");
                }
                BusRequest::Unsubscribe { id } => {
                    self.listeners.retain(|(existing, _)| *existing != id);
                    debug!(%id, listeners = self.listeners.len(), "Unsubscribed");
                }
                BusRequest::Publish(event) => self.deliver(&event),
                BusRequest::Flush { respond_to } => {
                    let _ = respond_to.send(());
                }
                BusRequest::Shutdown => break,
            }
        }

        info!(listeners = self.listeners.len(), "Event bus shutdown");
    }

    fn deliver(&self, event: &KitchenEvent) {
        let kind = event.kind();
        for (id, listener) in &self.listeners {
            // One bad listener must not take the worker down with it.
            if catch_unwind(AssertUnwindSafe(|| listener.on_event(event))).is_err() {
                error!(%id, ?kind, "Listener panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::mock::RecordingListener;
    use crate::events::EventKind;
    use crate::model::{OrderRequest, Temperature};

    fn received(name: &str) -> KitchenEvent {
        KitchenEvent::OrderReceived {
            request: OrderRequest::new(name, Temperature::Hot, 100, 0.5),
        }
    }

    fn received_name(event: &KitchenEvent) -> String {
        match event {
            KitchenEvent::OrderReceived { request } => request.name.clone(),
            other => panic!("unexpected event {:?}", other.kind()),
        }
    }

    struct Panicky;

    impl EventListener for Panicky {
        fn on_order_received(&self, _request: &OrderRequest) {
            panic!("listener failure");
        }
    }

    #[tokio::test]
    async fn delivers_in_publish_order() {
        let (bus, _handle) = EventBus::start();
        let listener = Arc::new(RecordingListener::new());
        let subscription = bus.subscribe(listener.clone());

        for i in 0..50 {
            bus.publish(received(&format!("order {}", i)));
        }
        bus.flush().await.unwrap();

        let names: Vec<String> = listener.events().iter().map(received_name).collect();
        let expected: Vec<String> = (0..50).map(|i| format!("order {}", i)).collect();
        assert_eq!(names, expected);

        bus.unsubscribe(subscription);
    }

    #[tokio::test]
    async fn every_listener_gets_every_event() {
        let (bus, _handle) = EventBus::start();
        let first = Arc::new(RecordingListener::new());
        let second = Arc::new(RecordingListener::new());
        let _a = bus.subscribe(first.clone());
        let _b = bus.subscribe(second.clone());

        bus.publish(received("Cheese Pizza"));
        bus.publish(received("Cobb Salad"));
        bus.flush().await.unwrap();

        assert_eq!(first.count(EventKind::Received), 2);
        assert_eq!(second.count(EventKind::Received), 2);
    }

    #[tokio::test]
    async fn unsubscribed_listener_stops_receiving() {
        let (bus, _handle) = EventBus::start();
        let listener = Arc::new(RecordingListener::new());
        let subscription = bus.subscribe(listener.clone());

        bus.publish(received("before"));
        bus.unsubscribe(subscription);
        bus.publish(received("after"));
        bus.flush().await.unwrap();

        let names: Vec<String> = listener.events().iter().map(received_name).collect();
        assert_eq!(names, vec!["before".to_string()]);
    }

    #[tokio::test]
    async fn panicking_listener_does_not_stop_delivery() {
        let (bus, _handle) = EventBus::start();
        let _bad = bus.subscribe(Arc::new(Panicky));
        let listener = Arc::new(RecordingListener::new());
        let _good = bus.subscribe(listener.clone());

        bus.publish(received("first"));
        bus.publish(received("second"));
        bus.flush().await.unwrap();

        assert_eq!(listener.count(EventKind::Received), 2);
    }

    #[tokio::test]
    async fn publishing_after_shutdown_is_harmless() {
        let (bus, handle) = EventBus::start();
        bus.shutdown();
        handle.await.unwrap();

        bus.publish(received("late"));
        assert_eq!(bus.flush().await, Err(BusError::BusClosed));
        assert!(bus.is_closed());
    }
}
