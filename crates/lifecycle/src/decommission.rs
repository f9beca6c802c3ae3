//! Decommissioning orchestration: lifecycle command plus data purge.

use common::AggregateId;
use domain::{DecommissionTenant, TenantService, TenantStatus};
use event_store::EventStore;
use registry::SlugRegistry;

use crate::cascade::{CascadeDeletionResult, CascadeDeletionService};
use crate::config::ConfigStore;
use crate::error::{LifecycleError, Result};

/// Drives a tenant out of service and removes its derived data.
///
/// The orchestrator performs the status check that the cascade service
/// deliberately skips: a purge is only allowed once the tenant's event
/// stream says it is decommissioned. The event log itself is never deleted;
/// only read models, the slug reservation, config entries, and the
/// non-authoritative snapshot go away.
pub struct DecommissionOrchestrator<S, R, C>
where
    S: EventStore,
    R: SlugRegistry,
    C: ConfigStore,
{
    store: S,
    tenant_service: TenantService<S, R>,
    cascade: CascadeDeletionService<R, C>,
}

impl<S, R, C> DecommissionOrchestrator<S, R, C>
where
    S: EventStore + Clone,
    R: SlugRegistry + Clone,
    C: ConfigStore,
{
    /// Creates a new orchestrator.
    pub fn new(store: S, registry: R, cascade: CascadeDeletionService<R, C>) -> Self {
        let tenant_service = TenantService::new(store.clone(), registry);
        Self {
            store,
            tenant_service,
            cascade,
        }
    }

    /// Returns a reference to the underlying tenant service.
    pub fn tenant_service(&self) -> &TenantService<S, R> {
        &self.tenant_service
    }

    /// Purges all derived data for an already-decommissioned tenant.
    ///
    /// Fails with [`LifecycleError::TenantNotDecommissioned`] when the tenant
    /// is in any other lifecycle state. Safe to re-run: every deletion step
    /// is a delete-if-exists.
    #[tracing::instrument(skip(self))]
    pub async fn purge_tenant(&self, tenant_id: AggregateId) -> Result<CascadeDeletionResult> {
        metrics::counter!("tenant_purges_total").increment(1);
        let purge_start = std::time::Instant::now();

        let tenant = self
            .tenant_service
            .find_tenant(tenant_id)
            .await?
            .ok_or(LifecycleError::TenantNotFound(tenant_id))?;

        if tenant.status() != TenantStatus::Decommissioned {
            return Err(LifecycleError::TenantNotDecommissioned {
                tenant_id,
                status: tenant.status(),
            });
        }

        let slug = tenant
            .slug()
            .cloned()
            .ok_or(LifecycleError::MissingSlug(tenant_id))?;

        let result = self.cascade.delete_tenant_data(&slug, tenant_id).await?;

        // The snapshot is derived state too; the event stream alone remains.
        let snapshot_deleted = self.store.delete_snapshot(tenant_id).await?;

        let duration = purge_start.elapsed().as_secs_f64();
        metrics::histogram!("tenant_purge_duration_seconds").record(duration);
        tracing::info!(
            %tenant_id,
            %slug,
            rows = result.projection_rows_deleted,
            snapshot_deleted,
            duration,
            "tenant purge complete"
        );

        Ok(result)
    }

    /// Decommissions the tenant and immediately purges its derived data.
    #[tracing::instrument(skip(self, cmd), fields(tenant_id = %cmd.tenant_id))]
    pub async fn decommission_and_purge(
        &self,
        cmd: DecommissionTenant,
    ) -> Result<CascadeDeletionResult> {
        let tenant_id = cmd.tenant_id;
        self.tenant_service.decommission_tenant(cmd).await?;
        self.purge_tenant(tenant_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cascade::CascadeDeletionService;
    use crate::config::InMemoryConfigStore;
    use common::TenantSlug;
    use domain::{ActivateTenant, ProvisionTenant};
    use event_store::InMemoryEventStore;
    use registry::InMemorySlugRegistry;

    fn slug(s: &str) -> TenantSlug {
        TenantSlug::parse(s).unwrap()
    }

    fn setup() -> DecommissionOrchestrator<InMemoryEventStore, InMemorySlugRegistry, InMemoryConfigStore>
    {
        let store = InMemoryEventStore::new();
        let registry = InMemorySlugRegistry::new();
        let config = InMemoryConfigStore::new();
        let cascade = CascadeDeletionService::new(vec![], registry.clone(), config);
        DecommissionOrchestrator::new(store, registry, cascade)
    }

    async fn provision_active_tenant(
        orchestrator: &DecommissionOrchestrator<
            InMemoryEventStore,
            InMemorySlugRegistry,
            InMemoryConfigStore,
        >,
    ) -> AggregateId {
        let cmd = ProvisionTenant::with_slug(slug("acme-corp"), "Acme Corp");
        let tenant_id = cmd.tenant_id;
        orchestrator
            .tenant_service()
            .provision_tenant(cmd)
            .await
            .unwrap();
        orchestrator
            .tenant_service()
            .activate_tenant(ActivateTenant::new(tenant_id, "system"))
            .await
            .unwrap();
        tenant_id
    }

    #[tokio::test]
    async fn test_purge_rejected_unless_decommissioned() {
        let orchestrator = setup();
        let tenant_id = provision_active_tenant(&orchestrator).await;

        let result = orchestrator.purge_tenant(tenant_id).await;
        assert!(matches!(
            result,
            Err(LifecycleError::TenantNotDecommissioned {
                status: TenantStatus::Active,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_purge_unknown_tenant() {
        let orchestrator = setup();
        let result = orchestrator.purge_tenant(AggregateId::new()).await;
        assert!(matches!(result, Err(LifecycleError::TenantNotFound(_))));
    }

    #[tokio::test]
    async fn test_decommission_and_purge() {
        let orchestrator = setup();
        let tenant_id = provision_active_tenant(&orchestrator).await;

        let result = orchestrator
            .decommission_and_purge(DecommissionTenant::new(tenant_id, "ops", "customer churn"))
            .await
            .unwrap();

        assert!(result.slug_released);
        assert_eq!(result.processed_categories.len(), 3);

        // The event stream survives the purge.
        let tenant = orchestrator
            .tenant_service()
            .get_tenant(tenant_id)
            .await
            .unwrap();
        assert_eq!(tenant.status(), TenantStatus::Decommissioned);
    }
}
