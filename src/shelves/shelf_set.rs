use crate::events::{EventBus, KitchenEvent};
use crate::model::{Order, OrderId, ShelfSetStatus, ShelfType, Temperature};
use crate::shelves::Shelf;
use tokio::time::Instant;
use tracing::{error, info, warn};

/// Where [`ShelfSet::add_order`] put an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Shelved(ShelfType),
    Discarded,
    /// The id was already on the given shelf; nothing changed.
    AlreadyShelved(ShelfType),
}

/// The hot, cold, frozen and overflow shelves of one kitchen, plus the policy
/// that decides where orders go.
///
/// # Concurrency
/// Every mutating operation takes `&mut self`. The kitchen actor owns the only
/// `ShelfSet` and handles one request at a time, so placement, pickup and status
/// reads never interleave and capacity checks cannot race.
pub struct ShelfSet {
    hot: Shelf,
    cold: Shelf,
    frozen: Shelf,
    overflow: Shelf,
    events: EventBus,
}

impl ShelfSet {
    /// The standard layout: 15 slots per temperature, 20 on overflow.
    pub fn new(events: EventBus) -> Self {
        Self::with_shelves(
            events,
            Shelf::new(ShelfType::Hot),
            Shelf::new(ShelfType::Cold),
            Shelf::new(ShelfType::Frozen),
            Shelf::new(ShelfType::Overflow),
        )
    }

    pub fn with_shelves(
        events: EventBus,
        hot: Shelf,
        cold: Shelf,
        frozen: Shelf,
        overflow: Shelf,
    ) -> Self {
        Self {
            hot,
            cold,
            frozen,
            overflow,
            events,
        }
    }

    pub fn shelf(&self, shelf_type: ShelfType) -> &Shelf {
        match shelf_type {
            ShelfType::Hot => &self.hot,
            ShelfType::Cold => &self.cold,
            ShelfType::Frozen => &self.frozen,
            ShelfType::Overflow => &self.overflow,
        }
    }

    fn shelf_mut(&mut self, shelf_type: ShelfType) -> &mut Shelf {
        match shelf_type {
            ShelfType::Hot => &mut self.hot,
            ShelfType::Cold => &mut self.cold,
            ShelfType::Frozen => &mut self.frozen,
            ShelfType::Overflow => &mut self.overflow,
        }
    }

    pub fn shelves(&self) -> [&Shelf; 4] {
        [&self.hot, &self.cold, &self.frozen, &self.overflow]
    }

    /// Shelf currently holding `id`, if any.
    pub fn locate(&self, id: &OrderId) -> Option<ShelfType> {
        self.shelves()
            .into_iter()
            .find(|shelf| shelf.contains(id))
            .map(Shelf::shelf_type)
    }

    pub fn status(&self) -> ShelfSetStatus {
        let now = Instant::now();
        ShelfSetStatus {
            shelves: self.shelves().iter().map(|s| s.status_at(now)).collect(),
        }
    }

    /// Puts `order` on its temperature shelf, else on overflow.
    ///
    /// When both are full, waste is evicted from every shelf and placement is
    /// retried once. If that fails too the order is discarded. An id that is
    /// already on a shelf is rejected and stays where it is.
    pub fn add_order(&mut self, order: Order) -> Admission {
        if let Some(shelf) = self.locate(&order.id) {
            warn!(order_id = %order.id, %shelf, "Order is already shelved, ignoring");
            return Admission::AlreadyShelved(shelf);
        }
        info!(order_id = %order.id, temperature = %order.temperature(), "Adding order to shelves");

        let order = match self.place(order) {
            Ok(shelf) => return Admission::Shelved(shelf),
            Err(order) => order,
        };

        warn!(
            order_id = %order.id,
            shelf = %order.temperature().primary_shelf(),
            "Temperature and overflow shelves are full, clearing waste"
        );
        self.sweep_waste();

        match self.place(order) {
            Ok(shelf) => Admission::Shelved(shelf),
            Err(order) => {
                self.discard(order);
                Admission::Discarded
            }
        }
    }

    fn place(&mut self, order: Order) -> Result<ShelfType, Order> {
        let primary = order.temperature().primary_shelf();
        let target = if self.shelf(primary).has_room() {
            primary
        } else if self.overflow.has_room() {
            ShelfType::Overflow
        } else {
            return Err(order);
        };

        let id = order.id.clone();
        self.shelf_mut(target).add(order)?;

        if let Some(order) = self.shelf(target).get(&id).cloned() {
            self.events.publish(KitchenEvent::OrderAddedToShelf {
                order,
                shelf: target,
                status: self.status(),
            });
        }
        Ok(target)
    }

    /// Removes the order from whichever shelf holds it, then pulls orders of the
    /// same temperature back from overflow into the freed space.
    ///
    /// Returns `None` if the id is unknown or the order had turned to waste.
    pub fn pickup_order(&mut self, id: &OrderId) -> Option<Order> {
        let order = ShelfType::ALL
            .into_iter()
            .find_map(|shelf_type| self.shelf_mut(shelf_type).pickup(id))?;

        self.rearrange(order.temperature());
        Some(order)
    }

    fn rearrange(&mut self, temperature: Temperature) {
        let primary = temperature.primary_shelf();

        while self.overflow.count_matching(temperature) > 0 && self.shelf(primary).has_room() {
            let Some(next) = self.overflow.remove_matching(temperature) else {
                return;
            };

            if next.is_waste() {
                info!(order_id = %next.id, "Clearing waste order from overflow");
                self.discard(next);
                continue;
            }

            info!(
                order_id = %next.id,
                shelf = %primary,
                normalized_value = next.normalized_value(),
                "Moving order from overflow back to its shelf"
            );
            if let Err(order) = self.shelf_mut(primary).add(next) {
                self.discard(order);
                return;
            }
        }
    }

    /// Evicts waste from all shelves, publishing a discard for each. Returns how many.
    pub fn sweep_waste(&mut self) -> usize {
        let waste: Vec<Order> = ShelfType::ALL
            .into_iter()
            .flat_map(|shelf_type| self.shelf_mut(shelf_type).evict_waste())
            .collect();

        let count = waste.len();
        for order in waste {
            self.discard(order);
        }
        count
    }

    fn discard(&self, order: Order) {
        error!(
            order_id = %order.id,
            temperature = %order.temperature(),
            "Discarding order, no space available"
        );
        self.events.publish(KitchenEvent::OrderDiscarded { order });
    }
}
