//! Pure data: order requests, prepared orders with their value model, and status snapshots.

pub mod order;
pub mod status;
pub mod temperature;

pub use order::*;
pub use status::*;
pub use temperature::*;
