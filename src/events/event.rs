//! # Kitchen Events
//!
//! The closed set of lifecycle notifications that flow through the [`EventBus`](super::EventBus).

use crate::model::{Order, OrderId, OrderRequest, ShelfSetStatus, ShelfType};

/// A lifecycle notification. Each variant carries owned copies of the entities
/// involved, so listeners never reach back into the kitchen to read them.
#[derive(Debug, Clone)]
pub enum KitchenEvent {
    OrderReceived {
        request: OrderRequest,
    },
    OrderPrepared {
        order: Order,
    },
    OrderAddedToShelf {
        order: Order,
        shelf: ShelfType,
        status: ShelfSetStatus,
    },
    OrderDiscarded {
        order: Order,
    },
    OrderPickedUp {
        order: Order,
        courier: String,
        status: ShelfSetStatus,
    },
    OrderDelivered {
        order: Order,
        courier: String,
    },
}

/// Discriminant of a [`KitchenEvent`], handy for filtering and counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Received,
    Prepared,
    Shelved,
    Discarded,
    PickedUp,
    Delivered,
}

impl KitchenEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            KitchenEvent::OrderReceived { .. } => EventKind::Received,
            KitchenEvent::OrderPrepared { .. } => EventKind::Prepared,
            KitchenEvent::OrderAddedToShelf { .. } => EventKind::Shelved,
            KitchenEvent::OrderDiscarded { .. } => EventKind::Discarded,
            KitchenEvent::OrderPickedUp { .. } => EventKind::PickedUp,
            KitchenEvent::OrderDelivered { .. } => EventKind::Delivered,
        }
    }

    /// The order this event is about. Received events precede id assignment.
    pub fn order_id(&self) -> Option<&OrderId> {
        match self {
            KitchenEvent::OrderReceived { .. } => None,
            KitchenEvent::OrderPrepared { order }
            | KitchenEvent::OrderAddedToShelf { order, .. }
            | KitchenEvent::OrderDiscarded { order }
            | KitchenEvent::OrderPickedUp { order, .. }
            | KitchenEvent::OrderDelivered { order, .. } => Some(&order.id),
        }
    }
}
