//! Tenant lifecycle and query endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use common::{AggregateId, TenantSlug};
use domain::{
    ActivateTenant, Aggregate, DecommissionTenant, Principal, ProvisionTenant, RenameTenant,
    SuspendTenant, SuspensionCategory, Tenant, TenantService, UpdateTenantConfig,
};
use event_store::EventStore;
use lifecycle::{DecommissionOrchestrator, InMemoryConfigStore, LifecycleError};
use projections::{LifecycleAuditView, ProjectionProcessor, TenantDirectoryView};
use registry::InMemorySlugRegistry;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Role required for suspension, decommissioning, and purge.
const OPERATOR_ROLE: &str = "operator";

/// Shared application state accessible from all handlers.
pub struct AppState<S: EventStore> {
    pub orchestrator: DecommissionOrchestrator<S, InMemorySlugRegistry, InMemoryConfigStore>,
    pub tenant_directory: Arc<TenantDirectoryView>,
    pub lifecycle_audit: Arc<LifecycleAuditView>,
    pub event_store: S,
    pub projection_processor: Arc<ProjectionProcessor<S>>,
}

impl<S: EventStore + Clone> AppState<S> {
    fn tenant_service(&self) -> &TenantService<S, InMemorySlugRegistry> {
        self.orchestrator.tenant_service()
    }
}

// -- Request types --

#[derive(Deserialize)]
pub struct ProvisionRequest {
    pub slug: String,
    pub display_name: String,
    pub initial_config: Option<serde_json::Value>,
}

#[derive(Deserialize)]
pub struct SuspendRequest {
    pub reason: String,
    pub category: SuspensionCategory,
}

#[derive(Deserialize)]
pub struct DecommissionRequest {
    pub reason: String,
}

#[derive(Deserialize)]
pub struct UpdateConfigRequest {
    pub config: serde_json::Value,
}

#[derive(Deserialize)]
pub struct RenameRequest {
    pub display_name: String,
}

// -- Response types --

#[derive(Serialize)]
pub struct TenantResponse {
    pub tenant_id: String,
    pub slug: String,
    pub display_name: String,
    pub status: String,
    pub config: serde_json::Value,
    pub version: i64,
    pub last_suspension_reason: Option<String>,
    pub last_suspension_category: Option<String>,
}

impl TenantResponse {
    fn from_aggregate(tenant_id: AggregateId, tenant: &Tenant) -> Self {
        Self {
            tenant_id: tenant_id.to_string(),
            slug: tenant.slug().map(|s| s.to_string()).unwrap_or_default(),
            display_name: tenant.name().to_string(),
            status: tenant.status().to_string(),
            config: tenant.config().clone(),
            version: tenant.version().as_i64(),
            last_suspension_reason: tenant.last_suspension().map(|s| s.reason.clone()),
            last_suspension_category: tenant.last_suspension().map(|s| s.category.to_string()),
        }
    }
}

#[derive(Serialize)]
pub struct TenantProvisionedResponse {
    pub tenant_id: String,
    pub slug: String,
    pub status: String,
}

#[derive(Serialize)]
pub struct TenantSummaryResponse {
    pub tenant_id: String,
    pub slug: String,
    pub display_name: String,
    pub status: String,
    pub provisioned_at: String,
    pub updated_at: String,
}

#[derive(Serialize)]
pub struct PurgeResponse {
    pub tenant_id: String,
    pub projection_rows_deleted: u64,
    pub slug_released: bool,
    pub processed_categories: Vec<String>,
}

#[derive(Serialize)]
pub struct EventEnvelopeResponse {
    pub event_id: String,
    pub event_type: String,
    pub aggregate_id: String,
    pub version: i64,
    pub timestamp: String,
    pub payload: serde_json::Value,
}

// -- Principal extraction --

/// Builds the caller identity from the gateway-validated headers.
///
/// `x-principal-subject` is mandatory. `x-principal-roles` is a
/// comma-separated list. A caller with `x-principal-tenant` set is a
/// tenant-scoped user; without it, a system-level service identity.
fn principal_from_headers(headers: &HeaderMap) -> Result<Principal, ApiError> {
    let subject = headers
        .get("x-principal-subject")
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing x-principal-subject header".to_string()))?
        .to_string();

    let roles: Vec<String> = headers
        .get("x-principal-roles")
        .and_then(|v| v.to_str().ok())
        .map(|v| {
            v.split(',')
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty())
                .collect()
        })
        .unwrap_or_default();

    match headers.get("x-principal-tenant").and_then(|v| v.to_str().ok()) {
        Some(raw) => {
            let tenant = TenantSlug::parse(raw)
                .map_err(|e| ApiError::BadRequest(format!("Invalid x-principal-tenant: {e}")))?;
            Ok(Principal::user(tenant, subject, roles))
        }
        None => Ok(Principal::service(None, subject, roles)),
    }
}

fn require_operator(principal: &Principal) -> Result<(), ApiError> {
    if !principal.has_role(OPERATOR_ROLE) {
        return Err(ApiError::Forbidden(format!(
            "Role '{OPERATOR_ROLE}' is required for this operation"
        )));
    }
    Ok(())
}

// -- Handlers --

/// POST /tenants — provision a new tenant.
#[tracing::instrument(skip(state, headers, req))]
pub async fn provision<S: EventStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
    Json(req): Json<ProvisionRequest>,
) -> Result<(axum::http::StatusCode, Json<TenantProvisionedResponse>), ApiError> {
    principal_from_headers(&headers)?;

    let slug = TenantSlug::parse(req.slug.as_str())
        .map_err(|e| ApiError::BadRequest(format!("Invalid slug: {e}")))?;

    let cmd = ProvisionTenant::new(
        AggregateId::new(),
        slug.clone(),
        req.display_name,
        req.initial_config.unwrap_or_else(|| serde_json::json!({})),
    );
    let tenant_id = cmd.tenant_id;
    state.tenant_service().provision_tenant(cmd).await?;

    let response = TenantProvisionedResponse {
        tenant_id: tenant_id.to_string(),
        slug: slug.to_string(),
        status: "Provisioning".to_string(),
    };

    Ok((axum::http::StatusCode::CREATED, Json(response)))
}

/// GET /tenants — list all tenants from the directory read model.
#[tracing::instrument(skip(state))]
pub async fn list<S: EventStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<TenantSummaryResponse>>, ApiError> {
    // Run catch-up so the directory includes the latest events.
    state
        .projection_processor
        .run_catch_up()
        .await
        .map_err(LifecycleError::from)?;

    let entries = state.tenant_directory.get_all_tenants().await;

    let responses: Vec<TenantSummaryResponse> = entries
        .into_iter()
        .map(|e| TenantSummaryResponse {
            tenant_id: e.tenant_id.to_string(),
            slug: e.slug.to_string(),
            display_name: e.display_name,
            status: e.status.to_string(),
            provisioned_at: e.provisioned_at.to_rfc3339(),
            updated_at: e.updated_at.to_rfc3339(),
        })
        .collect();

    Ok(Json(responses))
}

/// GET /tenants/:id — load a tenant aggregate by ID.
#[tracing::instrument(skip(state))]
pub async fn get<S: EventStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<TenantResponse>, ApiError> {
    let tenant_id = parse_aggregate_id(&id)?;
    let tenant = state
        .tenant_service()
        .find_tenant(tenant_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Tenant {id} not found")))?;

    Ok(Json(TenantResponse::from_aggregate(tenant_id, &tenant)))
}

/// POST /tenants/:id/activate — move a provisioned tenant into service.
#[tracing::instrument(skip(state, headers))]
pub async fn activate<S: EventStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<TenantResponse>, ApiError> {
    let principal = principal_from_headers(&headers)?;
    let tenant_id = parse_aggregate_id(&id)?;

    state
        .tenant_service()
        .activate_tenant(ActivateTenant::new(tenant_id, principal.subject()))
        .await?;

    reload(&state, tenant_id, &id).await
}

/// POST /tenants/:id/suspend — take a tenant out of service (operator only).
#[tracing::instrument(skip(state, headers, req))]
pub async fn suspend<S: EventStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<SuspendRequest>,
) -> Result<Json<TenantResponse>, ApiError> {
    let principal = principal_from_headers(&headers)?;
    require_operator(&principal)?;
    let tenant_id = parse_aggregate_id(&id)?;

    state
        .tenant_service()
        .suspend_tenant(SuspendTenant::new(
            tenant_id,
            principal.subject(),
            req.reason,
            req.category,
        ))
        .await?;

    reload(&state, tenant_id, &id).await
}

/// POST /tenants/:id/decommission — retire a tenant permanently (operator only).
#[tracing::instrument(skip(state, headers, req))]
pub async fn decommission<S: EventStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<DecommissionRequest>,
) -> Result<Json<TenantResponse>, ApiError> {
    let principal = principal_from_headers(&headers)?;
    require_operator(&principal)?;
    let tenant_id = parse_aggregate_id(&id)?;

    state
        .tenant_service()
        .decommission_tenant(DecommissionTenant::new(
            tenant_id,
            principal.subject(),
            req.reason,
        ))
        .await?;

    reload(&state, tenant_id, &id).await
}

/// POST /tenants/:id/purge — cascade-delete derived data (operator only).
#[tracing::instrument(skip(state, headers))]
pub async fn purge<S: EventStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<PurgeResponse>, ApiError> {
    let principal = principal_from_headers(&headers)?;
    require_operator(&principal)?;
    let tenant_id = parse_aggregate_id(&id)?;

    let result = state.orchestrator.purge_tenant(tenant_id).await?;

    Ok(Json(PurgeResponse {
        tenant_id: tenant_id.to_string(),
        projection_rows_deleted: result.projection_rows_deleted,
        slug_released: result.slug_released,
        processed_categories: result.processed_categories,
    }))
}

/// PUT /tenants/:id/config — replace the tenant configuration document.
#[tracing::instrument(skip(state, headers, req))]
pub async fn update_config<S: EventStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<UpdateConfigRequest>,
) -> Result<Json<TenantResponse>, ApiError> {
    let principal = principal_from_headers(&headers)?;
    let tenant_id = parse_aggregate_id(&id)?;

    state
        .tenant_service()
        .update_tenant_config(UpdateTenantConfig::new(
            tenant_id,
            req.config,
            principal.subject(),
        ))
        .await?;

    reload(&state, tenant_id, &id).await
}

/// PUT /tenants/:id/name — change the tenant display name.
#[tracing::instrument(skip(state, headers, req))]
pub async fn rename<S: EventStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<RenameRequest>,
) -> Result<Json<TenantResponse>, ApiError> {
    let principal = principal_from_headers(&headers)?;
    let tenant_id = parse_aggregate_id(&id)?;

    state
        .tenant_service()
        .rename_tenant(RenameTenant::new(
            tenant_id,
            req.display_name,
            principal.subject(),
        ))
        .await?;

    reload(&state, tenant_id, &id).await
}

/// GET /tenants/:id/events — list all events for a tenant aggregate.
#[tracing::instrument(skip(state))]
pub async fn events<S: EventStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<EventEnvelopeResponse>>, ApiError> {
    let tenant_id = parse_aggregate_id(&id)?;

    let envelopes = state
        .event_store
        .get_events_for_aggregate(tenant_id)
        .await
        .map_err(domain::DomainError::from)?;

    if envelopes.is_empty() {
        return Err(ApiError::NotFound(format!("Tenant {id} not found")));
    }

    let responses: Vec<EventEnvelopeResponse> = envelopes
        .into_iter()
        .map(|e| EventEnvelopeResponse {
            event_id: e.event_id.to_string(),
            event_type: e.event_type,
            aggregate_id: e.aggregate_id.to_string(),
            version: e.version.as_i64(),
            timestamp: e.timestamp.to_rfc3339(),
            payload: e.payload,
        })
        .collect();

    Ok(Json(responses))
}

async fn reload<S: EventStore + Clone + 'static>(
    state: &AppState<S>,
    tenant_id: AggregateId,
    id: &str,
) -> Result<Json<TenantResponse>, ApiError> {
    let tenant = state
        .tenant_service()
        .find_tenant(tenant_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Tenant {id} not found")))?;
    Ok(Json(TenantResponse::from_aggregate(tenant_id, &tenant)))
}

fn parse_aggregate_id(id: &str) -> Result<AggregateId, ApiError> {
    let uuid = uuid::Uuid::parse_str(id)
        .map_err(|e| ApiError::BadRequest(format!("Invalid ID format: {e}")))?;
    Ok(AggregateId::from(uuid))
}
