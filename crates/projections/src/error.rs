//! Errors raised while feeding tenant events into the read models.

use thiserror::Error;

/// Errors that can occur while building or querying tenant read models.
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// The underlying event stream could not be read.
    #[error("Event store error: {0}")]
    EventStore(#[from] event_store::EventStoreError),

    /// A tenant event payload did not match the expected shape.
    #[error("Event deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// A view-specific failure while applying an event.
    #[error("Projection error: {0}")]
    Projection(String),
}

/// Result type for projection operations.
pub type Result<T> = std::result::Result<T, ProjectionError>;
