//! Couriers and the dispatcher that sends them.
//!
//! The [`Dispatcher`] listens for orders landing on a shelf and schedules one
//! [`Courier`] per order after a random transit delay.

pub mod courier;
pub mod dispatcher;

pub use courier::{Courier, PickupOutcome};
pub use dispatcher::Dispatcher;
