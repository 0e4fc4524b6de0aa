//! Shelf capacity, placement and eviction.
//!
//! - [`Shelf`] - a bounded container for one temperature class, or overflow
//! - [`ShelfSet`] - the four shelves of a kitchen and the admission policy across them

pub mod shelf;
pub mod shelf_set;

pub use shelf::Shelf;
pub use shelf_set::{Admission, ShelfSet};
