//! Domain error types.

use event_store::EventStoreError;
use registry::RegistryError;
use thiserror::Error;

use crate::tenant::TenantError;

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An error occurred in the event store.
    #[error("Event store error: {0}")]
    EventStore(#[from] EventStoreError),

    /// An error occurred in the tenant aggregate.
    #[error("Tenant error: {0}")]
    Tenant(TenantError),

    /// An error occurred in the slug registry.
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Aggregate not found.
    #[error("Aggregate not found: {aggregate_type} with id {aggregate_id}")]
    AggregateNotFound {
        aggregate_type: &'static str,
        aggregate_id: String,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DomainError {
    /// Whether retrying the operation could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            DomainError::EventStore(e) => e.is_transient(),
            DomainError::Registry(e) => e.is_transient(),
            _ => false,
        }
    }
}
