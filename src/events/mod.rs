//! Event-dispatch fabric.
//!
//! - [`KitchenEvent`] - the six lifecycle notifications, as one closed enum
//! - [`EventListener`] - hooks a component implements to react to events
//! - [`EventBus`] - publish/subscribe hub with a single delivery worker
//!
//! # Testing
//!
//! See [`mock`] for a listener that records deliveries.

pub mod bus;
pub mod error;
pub mod event;
pub mod listener;
pub mod mock;

pub use bus::{EventBus, EventWorker, Subscription, SubscriptionId};
pub use error::BusError;
pub use event::{EventKind, KitchenEvent};
pub use listener::EventListener;
