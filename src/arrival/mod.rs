//! Order arrivals: Poisson batch sizes, order templates, and the periodic generator.

pub mod catalog;
pub mod generator;
pub mod poisson;

pub use catalog::{CatalogError, OrderCatalog, OrderSource};
pub use generator::ArrivalGenerator;
pub use poisson::{PoissonStrategy, KNUTH_MAX_LAMBDA};
