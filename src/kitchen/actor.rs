use crate::events::{EventBus, KitchenEvent};
use crate::kitchen::{KitchenClient, KitchenRequest, PickedUpOrder};
use crate::model::{Order, OrderId, OrderRequest};
use crate::shelves::{Admission, ShelfSet};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Owns the shelves and serves kitchen requests one at a time.
///
/// **Concurrency Model**:
/// Order arrivals and courier pickups all funnel through this actor's channel.
/// Because only the actor touches the [`ShelfSet`], the whole shelf set behaves as
/// if guarded by a single lock: no two operations ever see a half-updated state.
pub struct KitchenActor {
    receiver: mpsc::Receiver<KitchenRequest>,
    shelves: ShelfSet,
    events: EventBus,
}

impl KitchenActor {
    pub fn new(buffer_size: usize, events: EventBus) -> (Self, KitchenClient) {
        Self::with_shelves(buffer_size, ShelfSet::new(events.clone()), events)
    }

    /// Build around a pre-configured shelf set, e.g. one with custom capacities.
    pub fn with_shelves(
        buffer_size: usize,
        shelves: ShelfSet,
        events: EventBus,
    ) -> (Self, KitchenClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            shelves,
            events,
        };
        (actor, KitchenClient::new(sender))
    }

    /// Processes requests until every client is dropped or `Shutdown` arrives.
    pub async fn run(mut self) {
        info!("Kitchen started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                KitchenRequest::ReceiveOrder {
                    request,
                    respond_to,
                } => {
                    let order = self.receive_order(request);
                    let _ = respond_to.send(order);
                }
                KitchenRequest::PickupOrder { id, respond_to } => {
                    let picked = self.pickup_order(&id);
                    let _ = respond_to.send(picked);
                }
                KitchenRequest::Status { respond_to } => {
                    let _ = respond_to.send(self.shelves.status());
                }
                KitchenRequest::SweepWaste { respond_to } => {
                    let evicted = self.shelves.sweep_waste();
                    debug!(evicted, "Waste sweep finished");
                    let _ = respond_to.send(evicted);
                }
                KitchenRequest::Shutdown => {
                    info!("Kitchen received shutdown request");
                    break;
                }
            }
        }

        info!("Kitchen shutdown");
    }

    fn receive_order(&mut self, request: OrderRequest) -> Order {
        info!(name = %request.name, temperature = %request.temperature, "Order received");
        self.events.publish(KitchenEvent::OrderReceived {
            request: request.clone(),
        });

        let order = Order::prepare(request);
        info!(order_id = %order.id, name = %order.request.name, "Order prepared");
        self.events.publish(KitchenEvent::OrderPrepared {
            order: order.clone(),
        });

        match self.shelves.add_order(order.clone()) {
            Admission::Shelved(shelf) => debug!(order_id = %order.id, %shelf, "Order shelved"),
            Admission::Discarded => debug!(order_id = %order.id, "Order discarded on arrival"),
            Admission::AlreadyShelved(shelf) => debug!(order_id = %order.id, %shelf, "Order was already shelved"),
        }
        order
    }

    /// The snapshot is taken in the same request, after any rearrangement.
    fn pickup_order(&mut self, id: &OrderId) -> Option<PickedUpOrder> {
        let Some(order) = self.shelves.pickup_order(id) else {
            warn!(order_id = %id, "Order not available for pickup");
            return None;
        };
        Some(PickedUpOrder {
            order,
            status: self.shelves.status(),
        })
    }
}
