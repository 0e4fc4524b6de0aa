//! # Test Doubles for the Event Bus
//!
//! [`RecordingListener`] subscribes like any other listener and keeps every event it
//! receives, so tests can assert on what the kitchen published without wiring up a
//! display or dispatcher.
//!
//! ```rust
//! use kitchen_sim::events::{EventBus, EventKind, KitchenEvent};
//! use kitchen_sim::events::mock::RecordingListener;
//! use kitchen_sim::model::{OrderRequest, Temperature};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (bus, _worker) = EventBus::start();
//!     let recorder = Arc::new(RecordingListener::new());
//!     let subscription = bus.subscribe(recorder.clone());
//!
//!     bus.publish(KitchenEvent::OrderReceived {
//!         request: OrderRequest::new("Pho", Temperature::Hot, 120, 0.3),
//!     });
//!
//!     // Deliveries are asynchronous: flush before asserting.
//!     bus.flush().await.unwrap();
//!     assert_eq!(recorder.count(EventKind::Received), 1);
//!
//!     bus.unsubscribe(subscription);
//! }
//! ```

use crate::events::{EventKind, EventListener, KitchenEvent};
use crate::model::OrderId;
use std::sync::Mutex;

/// Listener that records every event it receives, in delivery order.
#[derive(Default)]
pub struct RecordingListener {
    events: Mutex<Vec<KitchenEvent>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything received so far.
    pub fn events(&self) -> Vec<KitchenEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn kinds(&self) -> Vec<EventKind> {
        self.events.lock().unwrap().iter().map(KitchenEvent::kind).collect()
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.kind() == kind)
            .count()
    }

    /// Order ids carried by events of `kind`, in delivery order.
    pub fn order_ids(&self, kind: EventKind) -> Vec<OrderId> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.kind() == kind)
            .filter_map(|e| e.order_id().cloned())
            .collect()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl EventListener for RecordingListener {
    fn on_event(&self, event: &KitchenEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
