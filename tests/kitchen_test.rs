use kitchen_sim::events::mock::RecordingListener;
use kitchen_sim::events::{EventBus, EventKind, KitchenEvent};
use kitchen_sim::kitchen::{Kitchen, KitchenActor, KitchenClient};
use kitchen_sim::model::{OrderId, OrderRequest, ShelfType, Temperature};
use std::sync::Arc;

async fn start_kitchen() -> (KitchenClient, EventBus, Arc<RecordingListener>) {
    let (bus, _worker) = EventBus::start();
    let recorder = Arc::new(RecordingListener::new());
    let _subscription = bus.subscribe(recorder.clone());
    let (actor, client) = KitchenActor::new(16, bus.clone());
    tokio::spawn(actor.run());
    (client, bus, recorder)
}

/// Many producers race to fill the hot shelf; capacity holds and every
/// order is either shelved or discarded.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_arrivals_respect_capacity() {
    let (kitchen, bus, recorder) = start_kitchen().await;

    let mut producers = Vec::new();
    for producer in 0..8 {
        let kitchen = kitchen.clone();
        producers.push(tokio::spawn(async move {
            for i in 0..20 {
                kitchen
                    .receive_order(OrderRequest::new(
                        format!("Curry {producer}-{i}"),
                        Temperature::Hot,
                        300,
                        0.1,
                    ))
                    .await
                    .expect("kitchen should accept orders");
            }
        }));
    }
    for producer in producers {
        producer.await.unwrap();
    }
    bus.flush().await.unwrap();

    let status = kitchen.status().await.unwrap();
    assert_eq!(status.shelf(ShelfType::Hot).unwrap().size, 15);
    assert_eq!(status.shelf(ShelfType::Overflow).unwrap().size, 20);

    assert_eq!(recorder.count(EventKind::Received), 160);
    assert_eq!(recorder.count(EventKind::Shelved), 35);
    assert_eq!(recorder.count(EventKind::Discarded), 125);

    // No snapshot ever showed an over-full shelf.
    for event in recorder.events() {
        if let KitchenEvent::OrderAddedToShelf { status, .. } = event {
            for shelf in &status.shelves {
                assert!(shelf.size <= shelf.capacity, "{:?} over capacity", shelf.shelf_type);
            }
        }
    }
}

#[tokio::test]
async fn test_pickup_right_after_arrival_returns_same_order() {
    let (kitchen, _bus, _recorder) = start_kitchen().await;

    let order = kitchen
        .receive_order(OrderRequest::new("Acai Bowl", Temperature::Cold, 249, 0.3))
        .await
        .unwrap();

    let picked = kitchen.pickup_order(&order.id).await.unwrap().unwrap();
    assert_eq!(picked.order.id, order.id);
    assert_eq!(picked.order.name(), "Acai Bowl");
    assert_eq!(picked.status.total_orders(), 0);
}

#[tokio::test]
async fn test_unknown_pickup_is_not_an_error() {
    let (kitchen, _bus, _recorder) = start_kitchen().await;
    let result = kitchen.pickup_order(&OrderId::from("no-such-order")).await;
    assert_eq!(result.map(|o| o.is_none()), Ok(true));
}

#[tokio::test]
async fn test_arrival_event_sequence() {
    let (kitchen, bus, recorder) = start_kitchen().await;

    let order = kitchen
        .receive_order(OrderRequest::new("Popsicle", Temperature::Frozen, 345, 0.75))
        .await
        .unwrap();
    bus.flush().await.unwrap();

    assert_eq!(
        recorder.kinds(),
        vec![EventKind::Received, EventKind::Prepared, EventKind::Shelved]
    );
    assert_eq!(recorder.order_ids(EventKind::Shelved), vec![order.id]);
}

/// Overflow spill, then a pickup pulls the oldest overflow order back home.
#[tokio::test]
async fn test_pickup_rearranges_from_overflow() {
    let (kitchen, bus, recorder) = start_kitchen().await;

    let mut ids = Vec::new();
    for i in 0..17 {
        let order = kitchen
            .receive_order(OrderRequest::new(format!("Gelato {i}"), Temperature::Frozen, 300, 0.2))
            .await
            .unwrap();
        ids.push(order.id);
    }

    let status = kitchen.status().await.unwrap();
    assert_eq!(status.shelf(ShelfType::Frozen).unwrap().size, 15);
    assert_eq!(status.shelf(ShelfType::Overflow).unwrap().size, 2);

    let picked = kitchen.pickup_order(&ids[0]).await.unwrap().unwrap();

    // The snapshot returned with the pickup already reflects the move.
    let status = picked.status;
    let frozen = status.shelf(ShelfType::Frozen).unwrap();
    assert_eq!(frozen.size, 15);
    assert!(frozen.orders.iter().any(|o| o.id == ids[15].as_str()));
    let overflow = status.shelf(ShelfType::Overflow).unwrap();
    assert_eq!(overflow.size, 1);
    assert_eq!(overflow.orders[0].id, ids[16].as_str());

    // Moving back is not a new shelving.
    bus.flush().await.unwrap();
    assert_eq!(recorder.count(EventKind::Shelved), 17);
}
