//! # Kitchen Messages
//!
//! Requests sent from a [`KitchenClient`](super::KitchenClient) to the
//! [`KitchenActor`](super::KitchenActor). Each carries a one-shot channel for the reply.

use crate::model::{Order, OrderId, OrderRequest, ShelfSetStatus};
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the kitchen.
pub type Response<T> = oneshot::Sender<T>;

/// An order taken off the shelves, with the shelf snapshot right after it left.
#[derive(Debug, Clone)]
pub struct PickedUpOrder {
    pub order: Order,
    pub status: ShelfSetStatus,
}

#[derive(Debug)]
pub enum KitchenRequest {
    ReceiveOrder {
        request: OrderRequest,
        respond_to: Response<Order>,
    },
    PickupOrder {
        id: OrderId,
        respond_to: Response<Option<PickedUpOrder>>,
    },
    Status {
        respond_to: Response<ShelfSetStatus>,
    },
    SweepWaste {
        respond_to: Response<usize>,
    },
    Shutdown,
}
