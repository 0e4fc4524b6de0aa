use crate::events::KitchenEvent;
use crate::model::{Order, OrderRequest, ShelfSetStatus, ShelfType};

/// Receives kitchen lifecycle events from the bus.
///
/// Every hook defaults to a no-op, so a listener implements only what it cares
/// about. The bus calls [`EventListener::on_event`], which routes each variant to
/// its hook; override `on_event` itself to see every event in one place.
///
/// Hooks run on the bus worker. They must not block: spawn a task for anything slow.
pub trait EventListener: Send + Sync {
    fn on_event(&self, event: &KitchenEvent) {
        match event {
            KitchenEvent::OrderReceived { request } => self.on_order_received(request),
            KitchenEvent::OrderPrepared { order } => self.on_order_prepared(order),
            KitchenEvent::OrderAddedToShelf {
                order,
                shelf,
                status,
            } => self.on_order_added_to_shelf(order, *shelf, status),
            KitchenEvent::OrderDiscarded { order } => self.on_order_discarded(order),
            KitchenEvent::OrderPickedUp {
                order,
                courier,
                status,
            } => self.on_order_picked_up(order, courier, status),
            KitchenEvent::OrderDelivered { order, courier } => {
                self.on_order_delivered(order, courier)
            }
        }
    }

    fn on_order_received(&self, _request: &OrderRequest) {}

    fn on_order_prepared(&self, _order: &Order) {}

    fn on_order_added_to_shelf(&self, _order: &Order, _shelf: ShelfType, _status: &ShelfSetStatus) {}

    fn on_order_discarded(&self, _order: &Order) {}

    fn on_order_picked_up(&self, _order: &Order, _courier: &str, _status: &ShelfSetStatus) {}

    fn on_order_delivered(&self, _order: &Order, _courier: &str) {}
}
