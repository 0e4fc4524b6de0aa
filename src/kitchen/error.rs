//! Error types for talking to the kitchen.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum KitchenError {
    /// The kitchen actor has stopped and no longer accepts requests.
    #[error("Kitchen closed")]
    KitchenClosed,

    /// The kitchen actor stopped before answering.
    #[error("Kitchen dropped response channel")]
    KitchenDropped,
}
