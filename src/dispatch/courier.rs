use crate::events::{EventBus, KitchenEvent};
use crate::kitchen::{Kitchen, KitchenError, PickedUpOrder};
use crate::model::OrderId;
use tracing::{info, warn};

/// Outcome of one pickup attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupOutcome {
    Delivered,
    /// The order had already left the shelves, or had spoiled.
    Missed,
}

/// Collects one order from the kitchen and delivers it.
#[derive(Debug, Clone)]
pub struct Courier {
    name: String,
}

impl Courier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Takes `id` off the shelves. On success publishes the pickup and then the
    /// delivery; a missed pickup is only logged.
    pub async fn pickup(
        &self,
        kitchen: &dyn Kitchen,
        events: &EventBus,
        id: &OrderId,
    ) -> Result<PickupOutcome, KitchenError> {
        let Some(PickedUpOrder { order, status }) = kitchen.pickup_order(id).await? else {
            warn!(courier = %self.name, order_id = %id, "Order not available, nothing to deliver");
            return Ok(PickupOutcome::Missed);
        };

        info!(
            courier = %self.name,
            order_id = %order.id,
            value = order.value(),
            "Order picked up"
        );
        events.publish(KitchenEvent::OrderPickedUp {
            order: order.clone(),
            courier: self.name.clone(),
            status,
        });

        info!(courier = %self.name, order_id = %order.id, "Order delivered");
        events.publish(KitchenEvent::OrderDelivered {
            order,
            courier: self.name.clone(),
        });
        Ok(PickupOutcome::Delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::mock::RecordingListener;
    use crate::events::EventKind;
    use crate::kitchen::mock::MockKitchen;
    use crate::model::{Order, OrderRequest, ShelfSetStatus, ShelfStatus, ShelfType, Temperature};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[tokio::test]
    async fn test_missed_pickup_publishes_nothing() {
        let (bus, _worker) = EventBus::start();
        let recorder = Arc::new(RecordingListener::new());
        let _sub = bus.subscribe(recorder.clone());

        let mock = MockKitchen::new();
        let id = OrderId::from("gone");
        mock.expect_pickup(id.clone()).return_none();

        let outcome = Courier::new("courier-1")
            .pickup(&mock.client(), &bus, &id)
            .await
            .unwrap();

        bus.flush().await.unwrap();
        assert_eq!(outcome, PickupOutcome::Missed);
        assert!(recorder.events().is_empty());
        mock.verify();
    }

    #[tokio::test]
    async fn test_pickup_then_delivery_in_order() {
        let (bus, _worker) = EventBus::start();
        let recorder = Arc::new(RecordingListener::new());
        let _sub = bus.subscribe(recorder.clone());

        let order = Order::prepare(OrderRequest::new("Kale Salad", Temperature::Cold, 250, 0.5));
        let after_pickup = ShelfSetStatus {
            shelves: vec![ShelfStatus {
                shelf_type: ShelfType::Cold,
                size: 4,
                capacity: 15,
                orders: Vec::new(),
            }],
        };
        let mock = MockKitchen::new();
        mock.expect_pickup(order.id.clone())
            .return_order(order.clone(), after_pickup.clone());

        let outcome = Courier::new("courier-7")
            .pickup(&mock.client(), &bus, &order.id)
            .await
            .unwrap();

        bus.flush().await.unwrap();
        assert_eq!(outcome, PickupOutcome::Delivered);
        assert_eq!(recorder.kinds(), vec![EventKind::PickedUp, EventKind::Delivered]);
        match &recorder.events()[0] {
            KitchenEvent::OrderPickedUp { status, .. } => assert_eq!(*status, after_pickup),
            other => panic!("unexpected event {other:?}"),
        }
        match &recorder.events()[1] {
            KitchenEvent::OrderDelivered { courier, .. } => assert_eq!(courier, "courier-7"),
            other => panic!("unexpected event {other:?}"),
        }
        mock.verify();
    }

    /// Hands out one order, then behaves as if the actor has stopped.
    struct ClosingKitchen {
        picked: Mutex<Option<PickedUpOrder>>,
    }

    #[async_trait]
    impl Kitchen for ClosingKitchen {
        async fn receive_order(&self, _request: OrderRequest) -> Result<Order, KitchenError> {
            Err(KitchenError::KitchenClosed)
        }

        async fn pickup_order(&self, _id: &OrderId) -> Result<Option<PickedUpOrder>, KitchenError> {
            Ok(self.picked.lock().unwrap().take())
        }

        async fn status(&self) -> Result<ShelfSetStatus, KitchenError> {
            Err(KitchenError::KitchenClosed)
        }
    }

    #[tokio::test]
    async fn test_delivery_survives_kitchen_closing_after_pickup() {
        let (bus, _worker) = EventBus::start();
        let recorder = Arc::new(RecordingListener::new());
        let _sub = bus.subscribe(recorder.clone());

        let order = Order::prepare(OrderRequest::new("Ramen", Temperature::Hot, 300, 0.2));
        let kitchen = ClosingKitchen {
            picked: Mutex::new(Some(PickedUpOrder {
                order: order.clone(),
                status: ShelfSetStatus::default(),
            })),
        };

        let outcome = Courier::new("courier-3")
            .pickup(&kitchen, &bus, &order.id)
            .await
            .unwrap();

        bus.flush().await.unwrap();
        assert_eq!(outcome, PickupOutcome::Delivered);
        assert_eq!(recorder.kinds(), vec![EventKind::PickedUp, EventKind::Delivered]);
    }
}
