//! Lifecycle error types.

use common::AggregateId;
use domain::{DomainError, TenantStatus};
use event_store::EventStoreError;
use projections::ProjectionError;
use registry::RegistryError;
use thiserror::Error;

/// Errors that can occur during decommissioning and cascade deletion.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Purge was requested for a tenant that is not decommissioned.
    #[error("Tenant {tenant_id} is {status}, purge requires Decommissioned")]
    TenantNotDecommissioned {
        tenant_id: AggregateId,
        status: TenantStatus,
    },

    /// Tenant not found.
    #[error("Tenant not found: {0}")]
    TenantNotFound(AggregateId),

    /// Tenant has no slug recorded.
    #[error("Tenant {0} has no slug recorded")]
    MissingSlug(AggregateId),

    /// Config store error.
    #[error("Config store error: {0}")]
    ConfigStore(String),

    /// Domain error.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Event store error.
    #[error("Event store error: {0}")]
    EventStore(#[from] EventStoreError),

    /// Slug registry error.
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Projection store error.
    #[error("Projection error: {0}")]
    Projection(#[from] ProjectionError),
}

impl LifecycleError {
    /// Returns true if retrying the operation may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            LifecycleError::Domain(e) => e.is_transient(),
            LifecycleError::EventStore(e) => e.is_transient(),
            LifecycleError::Registry(e) => e.is_transient(),
            LifecycleError::Projection(ProjectionError::EventStore(e)) => e.is_transient(),
            LifecycleError::ConfigStore(_) => true,
            _ => false,
        }
    }
}

/// Convenience type alias for lifecycle results.
pub type Result<T> = std::result::Result<T, LifecycleError>;
