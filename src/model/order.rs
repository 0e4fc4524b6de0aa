//! Perishable orders and the time-decay value model.
//!
//! An [`Order`] remembers every shelf it has been placed on. Its value is never
//! stored: it is recomputed by replaying the placement history, so moving an order
//! between shelves changes how fast it decays from that point on.

use crate::model::{ShelfType, Temperature};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use tokio::time::Instant;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub String);

impl OrderId {
    /// A fresh, opaque identifier (32 lowercase hex characters).
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An incoming request, as read from an order template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub name: String,
    #[serde(rename = "temp")]
    pub temperature: Temperature,
    /// Shelf life in seconds.
    pub shelf_life: u32,
    /// Value lost per second, on top of the normal ageing.
    pub decay_rate: f64,
}

impl OrderRequest {
    pub fn new(
        name: impl Into<String>,
        temperature: Temperature,
        shelf_life: u32,
        decay_rate: f64,
    ) -> Self {
        Self {
            name: name.into(),
            temperature,
            shelf_life,
            decay_rate,
        }
    }
}

/// One stay on a shelf. The stay ends where the next placement starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub shelf: ShelfType,
    pub start: Instant,
}

/// An order that has been prepared by the kitchen.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    pub request: OrderRequest,
    pub created_at: Instant,
    placements: Vec<Placement>,
}

impl Order {
    /// Prepares a new order with a freshly generated id.
    pub fn prepare(request: OrderRequest) -> Self {
        Self::with_id(OrderId::generate(), request)
    }

    pub fn with_id(id: OrderId, request: OrderRequest) -> Self {
        Self {
            id,
            request,
            created_at: Instant::now(),
            placements: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.request.name
    }

    pub fn temperature(&self) -> Temperature {
        self.request.temperature
    }

    pub fn shelf_life(&self) -> u32 {
        self.request.shelf_life
    }

    pub fn decay_rate(&self) -> f64 {
        self.request.decay_rate
    }

    /// Effective decay rate while resident on `shelf`. Overflow doubles it.
    pub fn decay_rate_in(&self, shelf: ShelfType) -> f64 {
        match shelf {
            ShelfType::Overflow => self.decay_rate() * 2.0,
            _ => self.decay_rate(),
        }
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// The shelf this order was most recently placed on.
    pub fn current_shelf(&self) -> Option<ShelfType> {
        self.placements.last().map(|p| p.shelf)
    }

    /// When the open placement started.
    pub fn placed_at(&self) -> Option<Instant> {
        self.placements.last().map(|p| p.start)
    }

    pub fn register_placement(&mut self, shelf: ShelfType) {
        self.register_placement_at(shelf, Instant::now());
    }

    /// Closes the open placement at `at` and opens a new one on `shelf`.
    pub fn register_placement_at(&mut self, shelf: ShelfType, at: Instant) {
        // Placements stay chronological even if the caller hands us an older instant.
        let start = match self.placements.last() {
            Some(open) => at.max(open.start),
            None => at,
        };
        self.placements.push(Placement { shelf, start });
    }

    pub fn value(&self) -> i64 {
        self.value_at(Instant::now())
    }

    /// Replays the placement history, closing the open placement at `now`.
    pub fn value_at(&self, now: Instant) -> i64 {
        let shelf_life = f64::from(self.shelf_life());
        let mut value = i64::from(self.shelf_life());

        for (i, placement) in self.placements.iter().enumerate() {
            let end = self.placements.get(i + 1).map_or(now, |next| next.start);
            let age = end.saturating_duration_since(placement.start).as_secs() as f64;
            let rate = self.decay_rate_in(placement.shelf);
            let decayed = (shelf_life - age) - rate * age;
            value -= (shelf_life - decayed).abs().round() as i64;
        }

        value
    }

    pub fn normalized_value(&self) -> f64 {
        self.normalized_value_at(Instant::now())
    }

    pub fn normalized_value_at(&self, now: Instant) -> f64 {
        if self.shelf_life() == 0 {
            return 0.0;
        }
        self.value_at(now) as f64 / f64::from(self.shelf_life())
    }

    /// Waste has no value left and should come off the shelves.
    pub fn is_waste(&self) -> bool {
        self.is_waste_at(Instant::now())
    }

    pub fn is_waste_at(&self, now: Instant) -> bool {
        self.value_at(now) <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::time::Duration;

    fn order(shelf_life: u32, decay_rate: f64) -> Order {
        Order::with_id(
            OrderId::from("order_1"),
            OrderRequest::new("Banana Split", Temperature::Frozen, shelf_life, decay_rate),
        )
    }

    #[test]
    fn unplaced_order_keeps_full_value() {
        let order = order(300, 0.5);
        assert_eq!(order.value_at(Instant::now() + Duration::from_secs(100)), 300);
        assert_eq!(order.current_shelf(), None);
    }

    #[test]
    fn ages_by_shelf_life_and_decay() {
        let start = Instant::now();
        let mut order = order(300, 0.5);
        order.register_placement_at(ShelfType::Frozen, start);

        // 10s of age plus 0.5 * 10s of decay
        assert_eq!(order.value_at(start + Duration::from_secs(10)), 285);
        assert!((order.normalized_value_at(start + Duration::from_secs(10)) - 0.95).abs() < 1e-9);
    }

    #[test]
    fn partial_seconds_are_truncated() {
        let start = Instant::now();
        let mut order = order(100, 1.0);
        order.register_placement_at(ShelfType::Frozen, start);
        assert_eq!(order.value_at(start + Duration::from_millis(999)), 100);
        assert_eq!(order.value_at(start + Duration::from_millis(1999)), 98);
    }

    #[test]
    fn becomes_waste_after_shelf_life() {
        let start = Instant::now();
        let mut order = order(10, 1.0);
        order.register_placement_at(ShelfType::Frozen, start);

        assert!(!order.is_waste_at(start + Duration::from_secs(4)));
        assert!(order.is_waste_at(start + Duration::from_secs(11)));
    }

    #[test]
    fn overflow_doubles_decay_loss() {
        let start = Instant::now();
        let later = start + Duration::from_secs(20);

        let mut primary = order(300, 0.5);
        primary.register_placement_at(ShelfType::Frozen, start);
        let mut overflow = order(300, 0.5);
        overflow.register_placement_at(ShelfType::Overflow, start);

        // Both lose 20 to ageing; decay costs 10 on the primary shelf, 20 on overflow.
        let primary_decay_loss = 300 - primary.value_at(later) - 20;
        let overflow_decay_loss = 300 - overflow.value_at(later) - 20;
        assert_eq!(primary_decay_loss, 10);
        assert_eq!(overflow_decay_loss, 2 * primary_decay_loss);
    }

    #[test]
    fn replays_each_placement_with_its_own_rate() {
        let start = Instant::now();
        let mut order = order(300, 1.0);
        order.register_placement_at(ShelfType::Overflow, start);
        order.register_placement_at(ShelfType::Frozen, start + Duration::from_secs(10));

        // 10s on overflow: 10 + 20, then 5s on frozen: 5 + 5
        assert_eq!(order.value_at(start + Duration::from_secs(15)), 260);
        assert_eq!(order.placements().len(), 2);
        assert_eq!(order.current_shelf(), Some(ShelfType::Frozen));
    }

    #[test]
    fn placements_stay_chronological() {
        let start = Instant::now();
        let mut order = order(300, 1.0);
        order.register_placement_at(ShelfType::Overflow, start + Duration::from_secs(5));
        order.register_placement_at(ShelfType::Frozen, start);

        let placements = order.placements();
        assert!(placements[0].start <= placements[1].start);
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = OrderId::generate();
        let b = OrderId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 32);
    }

    proptest! {
        #[test]
        fn value_never_increases_on_one_shelf(
            shelf_life in 1u32..1000,
            decay_rate in 0.0f64..5.0,
            earlier in 0u64..2000,
            extra in 0u64..2000,
            overflow in any::<bool>(),
        ) {
            let start = Instant::now();
            let shelf = if overflow { ShelfType::Overflow } else { ShelfType::Hot };
            let mut order = order(shelf_life, decay_rate);
            order.register_placement_at(shelf, start);

            let first = order.value_at(start + Duration::from_secs(earlier));
            let second = order.value_at(start + Duration::from_secs(earlier + extra));
            prop_assert!(second <= first);
        }
    }
}
