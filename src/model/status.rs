//! Point-in-time view of the shelves, handed to display sinks.
//!
//! Field names follow the JSON document consumers expect
//! (`shelfType`, `size`, `capacity`, `orders[...]`).

use crate::model::{Order, ShelfType, Temperature};
use serde::Serialize;
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub name: String,
    pub id: String,
    pub temperature: Temperature,
    pub shelf_life: u32,
    pub value: i64,
    pub normalized_value: f64,
}

impl OrderSummary {
    pub fn of(order: &Order, now: Instant) -> Self {
        Self {
            name: order.name().to_string(),
            id: order.id.to_string(),
            temperature: order.temperature(),
            shelf_life: order.shelf_life(),
            value: order.value_at(now),
            normalized_value: order.normalized_value_at(now),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShelfStatus {
    pub shelf_type: ShelfType,
    pub size: usize,
    pub capacity: usize,
    pub orders: Vec<OrderSummary>,
}

/// Status of all four shelves, in hot, cold, frozen, overflow order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ShelfSetStatus {
    pub shelves: Vec<ShelfStatus>,
}

impl ShelfSetStatus {
    pub fn shelf(&self, shelf_type: ShelfType) -> Option<&ShelfStatus> {
        self.shelves.iter().find(|s| s.shelf_type == shelf_type)
    }

    /// Total number of orders across every shelf.
    pub fn total_orders(&self) -> usize {
        self.shelves.iter().map(|s| s.size).sum()
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderId, OrderRequest};

    #[test]
    fn serializes_with_expected_field_names() {
        let now = Instant::now();
        let mut order = Order::with_id(
            OrderId::from("abc"),
            OrderRequest::new("Pad See Ew", Temperature::Hot, 210, 0.72),
        );
        order.register_placement_at(ShelfType::Hot, now);

        let status = ShelfSetStatus {
            shelves: vec![ShelfStatus {
                shelf_type: ShelfType::Hot,
                size: 1,
                capacity: 15,
                orders: vec![OrderSummary::of(&order, now)],
            }],
        };

        let json: serde_json::Value = serde_json::from_str(&status.to_json_pretty().unwrap()).unwrap();
        let shelf = &json[0];
        assert_eq!(shelf["shelfType"], "HOT");
        assert_eq!(shelf["size"], 1);
        assert_eq!(shelf["capacity"], 15);
        let summary = &shelf["orders"][0];
        assert_eq!(summary["name"], "Pad See Ew");
        assert_eq!(summary["id"], "abc");
        assert_eq!(summary["temperature"], "HOT");
        assert_eq!(summary["shelfLife"], 210);
        assert_eq!(summary["value"], 210);
        assert_eq!(summary["normalizedValue"], 1.0);
        assert_eq!(status.total_orders(), 1);
    }
}
