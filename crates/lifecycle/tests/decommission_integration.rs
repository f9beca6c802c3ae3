//! Integration tests for decommissioning and cascade deletion.

use std::sync::Arc;

use common::{AggregateId, TenantSlug};
use domain::{
    ActivateTenant, Aggregate, DecommissionTenant, ProvisionTenant, SuspendTenant,
    SuspensionCategory, TenantService, TenantStatus,
};
use event_store::{EventStore, InMemoryEventStore};
use lifecycle::{
    CascadeDeletionService, ConfigStore, DecommissionOrchestrator, InMemoryConfigStore,
    LifecycleError,
};
use projections::{
    LifecycleAuditView, ProjectionProcessor, TenantDirectoryView, TenantScopedStore,
};
use registry::{InMemorySlugRegistry, SlugRegistry};

fn slug(s: &str) -> TenantSlug {
    TenantSlug::parse(s).unwrap()
}

struct TestHarness {
    store: InMemoryEventStore,
    registry: InMemorySlugRegistry,
    config: InMemoryConfigStore,
    directory: TenantDirectoryView,
    audit: LifecycleAuditView,
    processor: ProjectionProcessor<InMemoryEventStore>,
    orchestrator:
        DecommissionOrchestrator<InMemoryEventStore, InMemorySlugRegistry, InMemoryConfigStore>,
}

impl TestHarness {
    fn new() -> Self {
        let store = InMemoryEventStore::new();
        let registry = InMemorySlugRegistry::new();
        let config = InMemoryConfigStore::new();
        let directory = TenantDirectoryView::new();
        let audit = LifecycleAuditView::new();

        let mut processor = ProjectionProcessor::new(store.clone());
        processor.register(Box::new(directory.clone()));
        processor.register(Box::new(audit.clone()));

        let cascade = CascadeDeletionService::new(
            vec![
                Arc::new(directory.clone()) as Arc<dyn TenantScopedStore>,
                Arc::new(audit.clone()) as Arc<dyn TenantScopedStore>,
            ],
            registry.clone(),
            config.clone(),
        );
        let orchestrator = DecommissionOrchestrator::new(store.clone(), registry.clone(), cascade);

        Self {
            store,
            registry,
            config,
            directory,
            audit,
            processor,
            orchestrator,
        }
    }

    fn service(&self) -> &TenantService<InMemoryEventStore, InMemorySlugRegistry> {
        self.orchestrator.tenant_service()
    }

    /// Provisions and activates a tenant, with some config entries.
    async fn active_tenant(&self, s: &str) -> AggregateId {
        let cmd = ProvisionTenant::with_slug(slug(s), "Acme Corp");
        let tenant_id = cmd.tenant_id;
        self.service().provision_tenant(cmd).await.unwrap();
        self.service()
            .activate_tenant(ActivateTenant::new(tenant_id, "system"))
            .await
            .unwrap();
        self.config
            .set_tenant(&slug(s), "theme", "dark")
            .await
            .unwrap();
        tenant_id
    }
}

#[tokio::test]
async fn test_decommission_then_purge_clears_derived_data() {
    let h = TestHarness::new();
    let tenant_id = h.active_tenant("acme-corp").await;

    h.service()
        .suspend_tenant(SuspendTenant::new(
            tenant_id,
            "billing",
            "unpaid invoice",
            SuspensionCategory::Billing,
        ))
        .await
        .unwrap();
    h.service()
        .decommission_tenant(DecommissionTenant::new(tenant_id, "ops", "customer churn"))
        .await
        .unwrap();

    // Build the read models before purging.
    h.processor.run_catch_up().await.unwrap();
    assert!(h.directory.get_tenant(tenant_id).await.is_some());
    assert_eq!(h.audit.get_records_for_tenant(tenant_id).await.len(), 4);

    let result = h.orchestrator.purge_tenant(tenant_id).await.unwrap();

    // Directory entry + 4 audit records.
    assert_eq!(result.projection_rows_deleted, 5);
    assert!(result.slug_released);
    assert_eq!(
        result.processed_categories,
        vec!["projections", "slug_reservation", "config"]
    );

    assert!(h.directory.get_tenant(tenant_id).await.is_none());
    assert!(h.audit.get_records_for_tenant(tenant_id).await.is_empty());
    assert!(h.registry.lookup(&slug("acme-corp")).await.unwrap().is_none());
    assert_eq!(h.config.entry_count(&slug("acme-corp")), 0);

    // The slug can be taken by a new tenant.
    let cmd = ProvisionTenant::with_slug(slug("acme-corp"), "New Acme");
    assert!(h.service().provision_tenant(cmd).await.is_ok());
}

#[tokio::test]
async fn test_event_log_survives_purge() {
    let h = TestHarness::new();
    let tenant_id = h.active_tenant("acme-corp").await;

    h.service()
        .decommission_tenant(DecommissionTenant::new(tenant_id, "ops", "customer churn"))
        .await
        .unwrap();
    h.orchestrator.purge_tenant(tenant_id).await.unwrap();

    // The full stream is still readable and the aggregate still folds.
    let events = h.store.get_events_for_aggregate(tenant_id).await.unwrap();
    assert_eq!(events.len(), 3);

    let tenant = h.service().get_tenant(tenant_id).await.unwrap();
    assert_eq!(tenant.status(), TenantStatus::Decommissioned);
}

#[tokio::test]
async fn test_double_purge_is_idempotent() {
    let h = TestHarness::new();
    let tenant_id = h.active_tenant("acme-corp").await;

    h.service()
        .decommission_tenant(DecommissionTenant::new(tenant_id, "ops", "customer churn"))
        .await
        .unwrap();
    h.processor.run_catch_up().await.unwrap();

    let first = h.orchestrator.purge_tenant(tenant_id).await.unwrap();
    let second = h.orchestrator.purge_tenant(tenant_id).await.unwrap();

    assert!(first.projection_rows_deleted > 0);
    assert_eq!(second.projection_rows_deleted, 0);
    assert!(first.slug_released);
    assert!(second.slug_released);
    assert_eq!(first.processed_categories, second.processed_categories);
}

#[tokio::test]
async fn test_purge_requires_decommissioned_status() {
    let h = TestHarness::new();
    let tenant_id = h.active_tenant("acme-corp").await;

    let result = h.orchestrator.purge_tenant(tenant_id).await;
    assert!(matches!(
        result,
        Err(LifecycleError::TenantNotDecommissioned {
            status: TenantStatus::Active,
            ..
        })
    ));

    // Suspended is not enough either.
    h.service()
        .suspend_tenant(SuspendTenant::new(
            tenant_id,
            "ops",
            "investigating",
            SuspensionCategory::Abuse,
        ))
        .await
        .unwrap();
    let result = h.orchestrator.purge_tenant(tenant_id).await;
    assert!(matches!(
        result,
        Err(LifecycleError::TenantNotDecommissioned {
            status: TenantStatus::Suspended,
            ..
        })
    ));

    // Nothing was deleted by the rejected attempts.
    assert!(h.registry.lookup(&slug("acme-corp")).await.unwrap().is_some());
    assert_eq!(h.config.entry_count(&slug("acme-corp")), 1);
}

#[tokio::test]
async fn test_registry_failure_propagates_and_retry_completes() {
    let h = TestHarness::new();
    let tenant_id = h.active_tenant("acme-corp").await;

    h.service()
        .decommission_tenant(DecommissionTenant::new(tenant_id, "ops", "customer churn"))
        .await
        .unwrap();
    h.processor.run_catch_up().await.unwrap();

    h.registry.set_fail_on_release(true);
    let result = h.orchestrator.purge_tenant(tenant_id).await;
    let err = result.unwrap_err();
    assert!(matches!(err, LifecycleError::Registry(_)));
    assert!(err.is_transient());

    // Config entries were not reached; projections were already cleared.
    assert_eq!(h.config.entry_count(&slug("acme-corp")), 1);
    assert!(h.directory.get_tenant(tenant_id).await.is_none());

    // A retry after the registry recovers completes the remaining categories.
    h.registry.set_fail_on_release(false);
    let result = h.orchestrator.purge_tenant(tenant_id).await.unwrap();
    assert_eq!(result.projection_rows_deleted, 0);
    assert!(result.slug_released);
    assert_eq!(h.config.entry_count(&slug("acme-corp")), 0);
}

#[tokio::test]
async fn test_purge_deletes_snapshot_but_not_events() {
    let h = TestHarness::new();
    let tenant_id = h.active_tenant("acme-corp").await;

    // Force a snapshot by writing one directly at the current version.
    let tenant = h.service().get_tenant(tenant_id).await.unwrap();
    let snapshot = event_store::Snapshot::from_state(
        tenant_id,
        "Tenant",
        tenant.version(),
        &tenant,
    )
    .unwrap();
    h.store.save_snapshot(snapshot).await.unwrap();
    assert!(h.store.get_snapshot(tenant_id).await.unwrap().is_some());

    h.service()
        .decommission_tenant(DecommissionTenant::new(tenant_id, "ops", "customer churn"))
        .await
        .unwrap();
    h.orchestrator.purge_tenant(tenant_id).await.unwrap();

    assert!(h.store.get_snapshot(tenant_id).await.unwrap().is_none());
    assert!(!h.store.get_events_for_aggregate(tenant_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_decommission_and_purge_one_call() {
    let h = TestHarness::new();
    let tenant_id = h.active_tenant("acme-corp").await;

    let result = h
        .orchestrator
        .decommission_and_purge(DecommissionTenant::new(tenant_id, "ops", "customer churn"))
        .await
        .unwrap();

    assert!(result.slug_released);
    let tenant = h.service().get_tenant(tenant_id).await.unwrap();
    assert!(tenant.is_terminal());
}
