//! HTTP API server with observability for the tenant control plane.
//!
//! Provides REST endpoints for tenant lifecycle management, cascade
//! deletion, and event stream inspection, with structured logging
//! (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post, put};
use event_store::EventStore;
use metrics_exporter_prometheus::PrometheusHandle;
use projections::{ProjectionProcessor, TenantDirectoryView};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::tenants::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: EventStore + Clone + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/tenants", post(routes::tenants::provision::<S>))
        .route("/tenants", get(routes::tenants::list::<S>))
        .route("/tenants/{id}", get(routes::tenants::get::<S>))
        .route("/tenants/{id}/activate", post(routes::tenants::activate::<S>))
        .route("/tenants/{id}/suspend", post(routes::tenants::suspend::<S>))
        .route(
            "/tenants/{id}/decommission",
            post(routes::tenants::decommission::<S>),
        )
        .route("/tenants/{id}/purge", post(routes::tenants::purge::<S>))
        .route("/tenants/{id}/config", put(routes::tenants::update_config::<S>))
        .route("/tenants/{id}/name", put(routes::tenants::rename::<S>))
        .route("/tenants/{id}/events", get(routes::tenants::events::<S>))
        .with_state(state)
        .merge(routes::metrics::metrics_router(metrics_handle))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the default application state with in-memory adapters.
pub fn create_default_state<S: EventStore + Clone + 'static>(
    event_store: S,
) -> (
    Arc<AppState<S>>,
    Arc<ProjectionProcessor<S>>,
    Arc<TenantDirectoryView>,
) {
    use lifecycle::{CascadeDeletionService, DecommissionOrchestrator, InMemoryConfigStore};
    use projections::{LifecycleAuditView, Projection, TenantScopedStore};
    use registry::InMemorySlugRegistry;

    let slug_registry = InMemorySlugRegistry::new();
    let config_store = InMemoryConfigStore::new();

    let tenant_directory = Arc::new(TenantDirectoryView::new());
    let lifecycle_audit = Arc::new(LifecycleAuditView::new());

    let mut processor = ProjectionProcessor::new(event_store.clone());
    processor.register(Box::new(tenant_directory.as_ref().clone()) as Box<dyn Projection>);
    processor.register(Box::new(lifecycle_audit.as_ref().clone()) as Box<dyn Projection>);
    let processor = Arc::new(processor);

    let cascade = CascadeDeletionService::new(
        vec![
            tenant_directory.clone() as Arc<dyn TenantScopedStore>,
            lifecycle_audit.clone() as Arc<dyn TenantScopedStore>,
        ],
        slug_registry.clone(),
        config_store,
    );
    let orchestrator =
        DecommissionOrchestrator::new(event_store.clone(), slug_registry, cascade);

    let state = Arc::new(AppState {
        orchestrator,
        tenant_directory: tenant_directory.clone(),
        lifecycle_audit,
        event_store,
        projection_processor: processor.clone(),
    });

    (state, processor, tenant_directory)
}
