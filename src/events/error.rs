//! Error types for the event bus.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum BusError {
    /// The worker has stopped and no longer accepts requests.
    #[error("Event bus closed")]
    BusClosed,

    /// The worker stopped before answering.
    #[error("Event bus worker dropped response channel")]
    WorkerDropped,
}
