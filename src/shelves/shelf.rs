use crate::model::{Order, OrderId, OrderSummary, ShelfStatus, ShelfType, Temperature};
use tokio::time::Instant;
use tracing::{debug, warn};

/// A bounded container of orders for one temperature class, or overflow.
///
/// Orders are kept in placement order, which makes the oldest resident of a
/// temperature the one [`Shelf::remove_matching`] gives up first.
#[derive(Debug, Clone)]
pub struct Shelf {
    shelf_type: ShelfType,
    capacity: usize,
    orders: Vec<Order>,
}

impl Shelf {
    /// A shelf with the standard capacity for its type.
    pub fn new(shelf_type: ShelfType) -> Self {
        Self::with_capacity(shelf_type, shelf_type.capacity())
    }

    pub fn with_capacity(shelf_type: ShelfType, capacity: usize) -> Self {
        Self {
            shelf_type,
            capacity,
            orders: Vec::with_capacity(capacity),
        }
    }

    pub fn shelf_type(&self) -> ShelfType {
        self.shelf_type
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.orders.len() >= self.capacity
    }

    pub fn has_room(&self) -> bool {
        !self.is_full()
    }

    pub fn contains(&self, id: &OrderId) -> bool {
        self.orders.iter().any(|o| &o.id == id)
    }

    pub fn get(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| &o.id == id)
    }

    /// Orders currently on the shelf, oldest placement first.
    pub fn items(&self) -> &[Order] {
        &self.orders
    }

    /// Places `order` on this shelf and records the placement.
    ///
    /// A full shelf, or one already holding the same id, rejects the order and
    /// hands it back untouched.
    pub fn add(&mut self, mut order: Order) -> Result<(), Order> {
        if self.contains(&order.id) {
            warn!(shelf = %self.shelf_type, order_id = %order.id, "Order already on shelf, not added");
            return Err(order);
        }

        if self.is_full() {
            warn!(shelf = %self.shelf_type, order_id = %order.id, "Shelf is full, order not added");
            return Err(order);
        }

        order.register_placement(self.shelf_type);
        self.orders.push(order);
        Ok(())
    }

    /// Removes the order. Waste is removed too, but reported as not found.
    pub fn pickup(&mut self, id: &OrderId) -> Option<Order> {
        let slot = self.orders.iter().position(|o| &o.id == id)?;
        let order = self.orders.remove(slot);

        if order.is_waste() {
            debug!(shelf = %self.shelf_type, order_id = %id, "Picked up order is waste, dropping it");
            return None;
        }
        Some(order)
    }

    pub fn count_matching(&self, temperature: Temperature) -> usize {
        self.orders
            .iter()
            .filter(|o| o.temperature() == temperature)
            .count()
    }

    /// Removes the oldest order of `temperature`, if there is one.
    pub fn remove_matching(&mut self, temperature: Temperature) -> Option<Order> {
        let slot = self
            .orders
            .iter()
            .position(|o| o.temperature() == temperature)?;
        Some(self.orders.remove(slot))
    }

    /// Ids of the orders that are waste right now.
    pub fn waste(&self) -> Vec<OrderId> {
        let now = Instant::now();
        self.orders
            .iter()
            .filter(|o| o.is_waste_at(now))
            .map(|o| o.id.clone())
            .collect()
    }

    /// Takes every waste order off the shelf and returns them.
    pub fn evict_waste(&mut self) -> Vec<Order> {
        let now = Instant::now();
        let (waste, fresh): (Vec<Order>, Vec<Order>) =
            self.orders.drain(..).partition(|o| o.is_waste_at(now));
        self.orders = fresh;

        if !waste.is_empty() {
            let ids: Vec<&str> = waste.iter().map(|o| o.id.as_str()).collect();
            warn!(shelf = %self.shelf_type, count = waste.len(), ?ids, "Removed waste orders");
        }
        waste
    }

    pub fn status_at(&self, now: Instant) -> ShelfStatus {
        ShelfStatus {
            shelf_type: self.shelf_type,
            size: self.len(),
            capacity: self.capacity,
            orders: self
                .orders
                .iter()
                .map(|o| OrderSummary::of(o, now))
                .collect(),
        }
    }
}
