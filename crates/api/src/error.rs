//! API error types and HTTP status mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::{DomainError, TenantError};
use event_store::EventStoreError;
use lifecycle::LifecycleError;
use registry::RegistryError;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by the HTTP layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The request was malformed or failed validation.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The caller lacks the role required for this operation.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Domain error.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Lifecycle error.
    #[error("Lifecycle error: {0}")]
    Lifecycle(#[from] LifecycleError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

fn domain_status(err: &DomainError) -> StatusCode {
    match err {
        DomainError::Tenant(TenantError::InvalidStateTransition { .. }) => StatusCode::CONFLICT,
        DomainError::Tenant(TenantError::AlreadyProvisioned) => StatusCode::CONFLICT,
        DomainError::Tenant(TenantError::NotProvisioned) => StatusCode::NOT_FOUND,
        DomainError::Tenant(_) => StatusCode::BAD_REQUEST,
        DomainError::Registry(RegistryError::SlugConflict { .. }) => StatusCode::CONFLICT,
        DomainError::EventStore(EventStoreError::ConcurrencyConflict { .. }) => StatusCode::CONFLICT,
        DomainError::EventStore(EventStoreError::AggregateNotFound(_)) => StatusCode::NOT_FOUND,
        DomainError::AggregateNotFound { .. } => StatusCode::NOT_FOUND,
        e if e.is_transient() => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn lifecycle_status(err: &LifecycleError) -> StatusCode {
    match err {
        LifecycleError::TenantNotDecommissioned { .. } => StatusCode::CONFLICT,
        LifecycleError::TenantNotFound(_) => StatusCode::NOT_FOUND,
        LifecycleError::Domain(e) => domain_status(e),
        e if e.is_transient() => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Domain(e) => domain_status(e),
            ApiError::Lifecycle(e) => lifecycle_status(e),
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

/// Convenience type alias for API handler results.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use common::AggregateId;
    use event_store::Version;

    #[test]
    fn test_invalid_transition_maps_to_conflict() {
        let err = DomainError::Tenant(TenantError::InvalidStateTransition {
            current_status: domain::TenantStatus::Provisioning,
            action: "suspend",
        });
        assert_eq!(domain_status(&err), StatusCode::CONFLICT);
    }

    #[test]
    fn test_validation_maps_to_bad_request() {
        assert_eq!(
            domain_status(&DomainError::Tenant(TenantError::EmptyReason)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            domain_status(&DomainError::Tenant(TenantError::EmptyName)),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_concurrency_conflict_maps_to_conflict() {
        let err = DomainError::EventStore(EventStoreError::ConcurrencyConflict {
            aggregate_id: AggregateId::new(),
            expected: Version::new(1),
            actual: Version::new(2),
        });
        assert_eq!(domain_status(&err), StatusCode::CONFLICT);
    }

    #[test]
    fn test_missing_aggregate_maps_to_not_found() {
        let err = DomainError::AggregateNotFound {
            aggregate_type: "Tenant",
            aggregate_id: AggregateId::new().to_string(),
        };
        assert_eq!(domain_status(&err), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_transient_registry_failure_maps_to_unavailable() {
        let err = DomainError::Registry(RegistryError::Storage("connection reset".into()));
        assert_eq!(domain_status(&err), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_purge_gate_maps_to_conflict() {
        let err = LifecycleError::TenantNotDecommissioned {
            tenant_id: AggregateId::new(),
            status: domain::TenantStatus::Active,
        };
        assert_eq!(lifecycle_status(&err), StatusCode::CONFLICT);
    }
}
