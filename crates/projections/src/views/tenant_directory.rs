//! Tenant directory read model — current state of every tenant.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{AggregateId, TenantSlug};
use domain::{SuspensionCategory, TenantEvent, TenantStatus};
use event_store::EventEnvelope;
use tokio::sync::RwLock;

use crate::Result;
use crate::projection::{Projection, ProjectionPosition};
use crate::read_model::{ReadModel, TenantScopedStore};

/// A single tenant's directory entry.
#[derive(Debug, Clone)]
pub struct TenantDirectoryEntry {
    pub tenant_id: AggregateId,
    pub slug: TenantSlug,
    pub display_name: String,
    pub status: TenantStatus,
    pub provisioned_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_suspension_reason: Option<String>,
    pub last_suspension_category: Option<SuspensionCategory>,
}

/// Internal state for the tenant directory view.
struct TenantDirectoryState {
    tenants: HashMap<AggregateId, TenantDirectoryEntry>,
    /// Maps slug -> tenant_id for slug lookups.
    slug_index: HashMap<TenantSlug, AggregateId>,
    position: ProjectionPosition,
}

/// Read model view listing every tenant with its current lifecycle state.
///
/// Supports lookup by tenant ID and by slug, plus per-status counts for
/// operator dashboards.
#[derive(Clone)]
pub struct TenantDirectoryView {
    state: Arc<RwLock<TenantDirectoryState>>,
}

impl TenantDirectoryView {
    /// Creates a new empty tenant directory view.
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(TenantDirectoryState {
                tenants: HashMap::new(),
                slug_index: HashMap::new(),
                position: ProjectionPosition::zero(),
            })),
        }
    }

    /// Gets the directory entry for a specific tenant.
    pub async fn get_tenant(&self, tenant_id: AggregateId) -> Option<TenantDirectoryEntry> {
        self.state.read().await.tenants.get(&tenant_id).cloned()
    }

    /// Gets the directory entry for a tenant by slug.
    pub async fn get_by_slug(&self, slug: &TenantSlug) -> Option<TenantDirectoryEntry> {
        let state = self.state.read().await;
        let tenant_id = state.slug_index.get(slug)?;
        state.tenants.get(tenant_id).cloned()
    }

    /// Gets all tenant entries.
    pub async fn get_all_tenants(&self) -> Vec<TenantDirectoryEntry> {
        self.state.read().await.tenants.values().cloned().collect()
    }

    /// Gets all tenants in the given lifecycle status.
    pub async fn get_tenants_by_status(&self, status: TenantStatus) -> Vec<TenantDirectoryEntry> {
        self.state
            .read()
            .await
            .tenants
            .values()
            .filter(|t| t.status == status)
            .cloned()
            .collect()
    }

    /// Counts tenants per lifecycle status.
    pub async fn status_counts(&self) -> HashMap<TenantStatus, usize> {
        let state = self.state.read().await;
        let mut counts = HashMap::new();
        for entry in state.tenants.values() {
            *counts.entry(entry.status).or_insert(0) += 1;
        }
        counts
    }
}

impl Default for TenantDirectoryView {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Projection for TenantDirectoryView {
    fn name(&self) -> &'static str {
        "TenantDirectoryView"
    }

    async fn handle(&self, event: &EventEnvelope) -> Result<()> {
        if event.aggregate_type != "Tenant" {
            let mut state = self.state.write().await;
            state.position = state.position.advance();
            return Ok(());
        }

        let tenant_event: TenantEvent = serde_json::from_value(event.payload.clone())?;
        let tenant_id = event.aggregate_id;

        let mut state = self.state.write().await;

        match tenant_event {
            TenantEvent::TenantProvisioned(data) => {
                state.slug_index.insert(data.slug.clone(), tenant_id);
                state.tenants.insert(
                    tenant_id,
                    TenantDirectoryEntry {
                        tenant_id,
                        slug: data.slug,
                        display_name: data.display_name,
                        status: TenantStatus::Provisioning,
                        provisioned_at: data.provisioned_at,
                        updated_at: data.provisioned_at,
                        last_suspension_reason: None,
                        last_suspension_category: None,
                    },
                );
            }
            TenantEvent::TenantActivated(data) => {
                if let Some(entry) = state.tenants.get_mut(&tenant_id) {
                    entry.status = TenantStatus::Active;
                    entry.updated_at = data.activated_at;
                }
            }
            TenantEvent::TenantSuspended(data) => {
                if let Some(entry) = state.tenants.get_mut(&tenant_id) {
                    entry.status = TenantStatus::Suspended;
                    entry.updated_at = data.suspended_at;
                    entry.last_suspension_reason = Some(data.reason);
                    entry.last_suspension_category = Some(data.category);
                }
            }
            TenantEvent::TenantDecommissioned(data) => {
                if let Some(entry) = state.tenants.get_mut(&tenant_id) {
                    entry.status = TenantStatus::Decommissioned;
                    entry.updated_at = data.decommissioned_at;
                }
            }
            TenantEvent::TenantConfigUpdated(data) => {
                if let Some(entry) = state.tenants.get_mut(&tenant_id) {
                    entry.updated_at = data.updated_at;
                }
            }
            TenantEvent::TenantRenamed(data) => {
                if let Some(entry) = state.tenants.get_mut(&tenant_id) {
                    entry.display_name = data.new_name;
                    entry.updated_at = data.renamed_at;
                }
            }
        }

        state.position = state.position.advance();
        Ok(())
    }

    async fn position(&self) -> ProjectionPosition {
        self.state.read().await.position
    }

    async fn reset(&self) -> Result<()> {
        let mut state = self.state.write().await;
        state.tenants.clear();
        state.slug_index.clear();
        state.position = ProjectionPosition::zero();
        Ok(())
    }
}

impl ReadModel for TenantDirectoryView {
    fn name(&self) -> &'static str {
        "TenantDirectoryView"
    }

    fn count(&self) -> usize {
        self.state.try_read().map(|s| s.tenants.len()).unwrap_or(0)
    }
}

#[async_trait]
impl TenantScopedStore for TenantDirectoryView {
    fn store_name(&self) -> &'static str {
        "tenant_directory"
    }

    async fn delete_by_aggregate(&self, tenant_id: AggregateId) -> Result<u64> {
        let mut state = self.state.write().await;
        match state.tenants.remove(&tenant_id) {
            Some(entry) => {
                state.slug_index.remove(&entry.slug);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
