//! Cascade deletion of tenant-scoped derived data.

use std::sync::Arc;

use common::{AggregateId, TenantSlug};
use projections::TenantScopedStore;
use registry::SlugRegistry;

use crate::config::ConfigStore;
use crate::error::Result;

/// Category name for read-model projection rows.
pub const CATEGORY_PROJECTIONS: &str = "projections";
/// Category name for the slug reservation.
pub const CATEGORY_SLUG_RESERVATION: &str = "slug_reservation";
/// Category name for tenant-scoped config entries.
pub const CATEGORY_CONFIG: &str = "config";

/// Summary of one cascade deletion run.
#[derive(Debug, Clone)]
pub struct CascadeDeletionResult {
    /// Total projection rows removed across all registered stores.
    pub projection_rows_deleted: u64,

    /// True when the slug reservation is gone after this run. Stays true
    /// on replay: releasing an already-free slug is a successful no-op.
    pub slug_released: bool,

    /// Category names in the order they were attempted.
    pub processed_categories: Vec<String>,
}

/// Removes all tenant-scoped derived data for a decommissioned tenant.
///
/// Categories are processed in a fixed order: projection rows, then the
/// slug reservation, then config entries. Every step is a delete-if-exists,
/// so replaying a partially completed run is safe. The event log is never
/// touched. This service does not verify tenant status — that check belongs
/// to the caller.
pub struct CascadeDeletionService<R: SlugRegistry, C: ConfigStore> {
    projection_stores: Vec<Arc<dyn TenantScopedStore>>,
    registry: R,
    config: C,
}

impl<R: SlugRegistry, C: ConfigStore> CascadeDeletionService<R, C> {
    /// Creates a new cascade deletion service.
    pub fn new(
        projection_stores: Vec<Arc<dyn TenantScopedStore>>,
        registry: R,
        config: C,
    ) -> Self {
        Self {
            projection_stores,
            registry,
            config,
        }
    }

    /// Deletes all derived data for the given tenant.
    ///
    /// There is no rollback across categories: a storage error propagates
    /// to the caller, and the categories already processed stay deleted.
    /// The caller may re-run the whole operation safely.
    #[tracing::instrument(skip(self), fields(slug = %slug))]
    pub async fn delete_tenant_data(
        &self,
        slug: &TenantSlug,
        aggregate_id: AggregateId,
    ) -> Result<CascadeDeletionResult> {
        metrics::counter!("cascade_deletions_total").increment(1);

        let mut processed_categories = Vec::new();

        // 1. Projection rows, keyed by aggregate id.
        processed_categories.push(CATEGORY_PROJECTIONS.to_string());
        let mut projection_rows_deleted: u64 = 0;
        for store in &self.projection_stores {
            let deleted = store.delete_by_aggregate(aggregate_id).await?;
            if deleted > 0 {
                tracing::debug!(
                    store = store.store_name(),
                    rows = deleted,
                    "deleted projection rows"
                );
            }
            projection_rows_deleted += deleted;
        }
        metrics::counter!("cascade_rows_deleted_total").increment(projection_rows_deleted);

        // 2. Slug reservation.
        processed_categories.push(CATEGORY_SLUG_RESERVATION.to_string());
        let existed = self.registry.release(slug).await?;
        if !existed {
            tracing::debug!(%slug, "slug reservation was already released");
        }
        let slug_released = true;

        // 3. Tenant-scoped config entries.
        processed_categories.push(CATEGORY_CONFIG.to_string());
        let config_entries_deleted = self.config.delete_tenant_entries(slug).await?;

        tracing::info!(
            %aggregate_id,
            projection_rows_deleted,
            config_entries_deleted,
            "cascade deletion complete"
        );

        Ok(CascadeDeletionResult {
            projection_rows_deleted,
            slug_released,
            processed_categories,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InMemoryConfigStore;
    use crate::error::LifecycleError;
    use projections::{LifecycleAuditView, Projection, TenantDirectoryView};
    use registry::InMemorySlugRegistry;

    use domain::{DomainEvent, TenantEvent};
    use event_store::{EventEnvelope, Version};

    fn slug(s: &str) -> TenantSlug {
        TenantSlug::parse(s).unwrap()
    }

    fn make_envelope(
        aggregate_id: AggregateId,
        version: i64,
        event: &TenantEvent,
    ) -> EventEnvelope {
        EventEnvelope::builder()
            .aggregate_id(aggregate_id)
            .aggregate_type("Tenant")
            .event_type(event.event_type())
            .version(Version::new(version))
            .payload(event)
            .unwrap()
            .build()
    }

    async fn setup_with_data() -> (
        CascadeDeletionService<InMemorySlugRegistry, InMemoryConfigStore>,
        InMemorySlugRegistry,
        InMemoryConfigStore,
        TenantDirectoryView,
        LifecycleAuditView,
        AggregateId,
    ) {
        let registry = InMemorySlugRegistry::new();
        let config = InMemoryConfigStore::new();
        let directory = TenantDirectoryView::new();
        let audit = LifecycleAuditView::new();

        let tenant_id = AggregateId::new();
        registry.reserve(&slug("acme-corp"), tenant_id).await.unwrap();
        config
            .set_tenant(&slug("acme-corp"), "theme", "dark")
            .await
            .unwrap();

        let event = TenantEvent::tenant_provisioned(
            tenant_id,
            slug("acme-corp"),
            "Acme Corp",
            serde_json::json!({}),
        );
        directory
            .handle(&make_envelope(tenant_id, 1, &event))
            .await
            .unwrap();
        audit
            .handle(&make_envelope(tenant_id, 1, &event))
            .await
            .unwrap();

        let service = CascadeDeletionService::new(
            vec![
                Arc::new(directory.clone()) as Arc<dyn TenantScopedStore>,
                Arc::new(audit.clone()) as Arc<dyn TenantScopedStore>,
            ],
            registry.clone(),
            config.clone(),
        );

        (service, registry, config, directory, audit, tenant_id)
    }

    #[tokio::test]
    async fn test_deletes_all_categories_in_order() {
        let (service, registry, config, directory, audit, tenant_id) = setup_with_data().await;

        let result = service
            .delete_tenant_data(&slug("acme-corp"), tenant_id)
            .await
            .unwrap();

        assert_eq!(result.projection_rows_deleted, 2);
        assert!(result.slug_released);
        assert_eq!(
            result.processed_categories,
            vec!["projections", "slug_reservation", "config"]
        );

        assert!(directory.get_tenant(tenant_id).await.is_none());
        assert!(audit.get_records_for_tenant(tenant_id).await.is_empty());
        assert!(registry.lookup(&slug("acme-corp")).await.unwrap().is_none());
        assert_eq!(config.entry_count(&slug("acme-corp")), 0);
    }

    #[tokio::test]
    async fn test_replay_is_idempotent() {
        let (service, _registry, _config, _directory, _audit, tenant_id) = setup_with_data().await;

        let first = service
            .delete_tenant_data(&slug("acme-corp"), tenant_id)
            .await
            .unwrap();
        let second = service
            .delete_tenant_data(&slug("acme-corp"), tenant_id)
            .await
            .unwrap();

        assert_eq!(first.projection_rows_deleted, 2);
        assert_eq!(second.projection_rows_deleted, 0);

        // slug_released reports success both times.
        assert!(first.slug_released);
        assert!(second.slug_released);

        // All categories are attempted on both runs.
        assert_eq!(first.processed_categories, second.processed_categories);
    }

    #[tokio::test]
    async fn test_config_failure_propagates_after_earlier_categories() {
        let (service, registry, config, directory, _audit, tenant_id) = setup_with_data().await;

        config.set_fail_on_delete(true);

        let result = service
            .delete_tenant_data(&slug("acme-corp"), tenant_id)
            .await;
        assert!(matches!(result, Err(LifecycleError::ConfigStore(_))));

        // Earlier categories stay deleted; there is no rollback.
        assert!(directory.get_tenant(tenant_id).await.is_none());
        assert!(registry.lookup(&slug("acme-corp")).await.unwrap().is_none());

        // A retry after the backend recovers completes the run.
        config.set_fail_on_delete(false);
        let result = service
            .delete_tenant_data(&slug("acme-corp"), tenant_id)
            .await
            .unwrap();
        assert_eq!(result.projection_rows_deleted, 0);
        assert!(result.slug_released);
        assert_eq!(config.entry_count(&slug("acme-corp")), 0);
    }

    #[tokio::test]
    async fn test_tenant_with_no_derived_data() {
        let registry = InMemorySlugRegistry::new();
        let config = InMemoryConfigStore::new();
        let service = CascadeDeletionService::new(vec![], registry, config);

        let result = service
            .delete_tenant_data(&slug("ghost-corp"), AggregateId::new())
            .await
            .unwrap();

        assert_eq!(result.projection_rows_deleted, 0);
        assert!(result.slug_released);
        assert_eq!(result.processed_categories.len(), 3);
    }
}
