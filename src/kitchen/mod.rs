//! # Kitchen Actor
//!
//! The kitchen prepares incoming orders and keeps them on its shelves until a
//! courier collects them.
//!
//! - [`KitchenActor`] - owns the [`ShelfSet`](crate::shelves::ShelfSet); one request at a time
//! - [`KitchenClient`] - cheap, cloneable handle used by order sources and couriers
//! - [`Kitchen`] - the async interface couriers depend on
//!
//! # Testing
//!
//! [`mock::MockKitchen`] scripts kitchen responses without real shelves.

pub mod actor;
pub mod client;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::KitchenActor;
pub use client::{Kitchen, KitchenClient};
pub use error::KitchenError;
pub use message::{KitchenRequest, PickedUpOrder, Response};
