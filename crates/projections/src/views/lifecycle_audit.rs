//! Lifecycle audit read model — append-only trail of tenant transitions.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::AggregateId;
use domain::{SuspensionCategory, TenantEvent};
use event_store::{EventEnvelope, Version};
use tokio::sync::RwLock;

use crate::Result;
use crate::projection::{Projection, ProjectionPosition};
use crate::read_model::{ReadModel, TenantScopedStore};

/// What happened to a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    Provisioned,
    Activated,
    Suspended,
    Decommissioned,
    ConfigUpdated,
    Renamed,
}

impl LifecycleAction {
    /// Returns the action name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleAction::Provisioned => "provisioned",
            LifecycleAction::Activated => "activated",
            LifecycleAction::Suspended => "suspended",
            LifecycleAction::Decommissioned => "decommissioned",
            LifecycleAction::ConfigUpdated => "config_updated",
            LifecycleAction::Renamed => "renamed",
        }
    }
}

impl std::fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single audit record.
#[derive(Debug, Clone)]
pub struct LifecycleAuditRecord {
    pub tenant_id: AggregateId,
    pub action: LifecycleAction,
    pub initiated_by: String,
    pub reason: Option<String>,
    pub category: Option<SuspensionCategory>,
    pub version: Version,
    pub occurred_at: DateTime<Utc>,
}

/// Internal state for the lifecycle audit view.
struct LifecycleAuditState {
    records: Vec<LifecycleAuditRecord>,
    position: ProjectionPosition,
}

/// Read model view recording every tenant lifecycle transition in order.
///
/// Records are append-only while the tenant lives; cascade deletion removes
/// a tenant's records when it is purged.
#[derive(Clone)]
pub struct LifecycleAuditView {
    state: Arc<RwLock<LifecycleAuditState>>,
}

impl LifecycleAuditView {
    /// Creates a new empty lifecycle audit view.
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(LifecycleAuditState {
                records: Vec::new(),
                position: ProjectionPosition::zero(),
            })),
        }
    }

    /// Gets all audit records in arrival order.
    pub async fn get_all_records(&self) -> Vec<LifecycleAuditRecord> {
        self.state.read().await.records.clone()
    }

    /// Gets the audit records for a specific tenant, in arrival order.
    pub async fn get_records_for_tenant(
        &self,
        tenant_id: AggregateId,
    ) -> Vec<LifecycleAuditRecord> {
        self.state
            .read()
            .await
            .records
            .iter()
            .filter(|r| r.tenant_id == tenant_id)
            .cloned()
            .collect()
    }

    /// Gets all suspension records matching the given category.
    pub async fn get_records_by_category(
        &self,
        category: SuspensionCategory,
    ) -> Vec<LifecycleAuditRecord> {
        self.state
            .read()
            .await
            .records
            .iter()
            .filter(|r| r.category == Some(category))
            .cloned()
            .collect()
    }

    /// Returns the total number of audit records.
    pub async fn record_count(&self) -> usize {
        self.state.read().await.records.len()
    }
}

impl Default for LifecycleAuditView {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Projection for LifecycleAuditView {
    fn name(&self) -> &'static str {
        "LifecycleAuditView"
    }

    async fn handle(&self, event: &EventEnvelope) -> Result<()> {
        if event.aggregate_type != "Tenant" {
            let mut state = self.state.write().await;
            state.position = state.position.advance();
            return Ok(());
        }

        let tenant_event: TenantEvent = serde_json::from_value(event.payload.clone())?;
        let tenant_id = event.aggregate_id;
        let version = event.version;

        let record = match tenant_event {
            TenantEvent::TenantProvisioned(data) => LifecycleAuditRecord {
                tenant_id,
                action: LifecycleAction::Provisioned,
                initiated_by: "system".to_string(),
                reason: None,
                category: None,
                version,
                occurred_at: data.provisioned_at,
            },
            TenantEvent::TenantActivated(data) => LifecycleAuditRecord {
                tenant_id,
                action: LifecycleAction::Activated,
                initiated_by: data.initiated_by,
                reason: None,
                category: None,
                version,
                occurred_at: data.activated_at,
            },
            TenantEvent::TenantSuspended(data) => LifecycleAuditRecord {
                tenant_id,
                action: LifecycleAction::Suspended,
                initiated_by: data.initiated_by,
                reason: Some(data.reason),
                category: Some(data.category),
                version,
                occurred_at: data.suspended_at,
            },
            TenantEvent::TenantDecommissioned(data) => LifecycleAuditRecord {
                tenant_id,
                action: LifecycleAction::Decommissioned,
                initiated_by: data.initiated_by,
                reason: Some(data.reason),
                category: None,
                version,
                occurred_at: data.decommissioned_at,
            },
            TenantEvent::TenantConfigUpdated(data) => LifecycleAuditRecord {
                tenant_id,
                action: LifecycleAction::ConfigUpdated,
                initiated_by: data.updated_by,
                reason: None,
                category: None,
                version,
                occurred_at: data.updated_at,
            },
            TenantEvent::TenantRenamed(data) => LifecycleAuditRecord {
                tenant_id,
                action: LifecycleAction::Renamed,
                initiated_by: data.renamed_by,
                reason: None,
                category: None,
                version,
                occurred_at: data.renamed_at,
            },
        };

        let mut state = self.state.write().await;
        state.records.push(record);
        state.position = state.position.advance();
        Ok(())
    }

    async fn position(&self) -> ProjectionPosition {
        self.state.read().await.position
    }

    async fn reset(&self) -> Result<()> {
        let mut state = self.state.write().await;
        state.records.clear();
        state.position = ProjectionPosition::zero();
        Ok(())
    }
}

impl ReadModel for LifecycleAuditView {
    fn name(&self) -> &'static str {
        "LifecycleAuditView"
    }

    fn count(&self) -> usize {
        self.state.try_read().map(|s| s.records.len()).unwrap_or(0)
    }
}

#[async_trait]
impl TenantScopedStore for LifecycleAuditView {
    fn store_name(&self) -> &'static str {
        "lifecycle_audit"
    }

    async fn delete_by_aggregate(&self, tenant_id: AggregateId) -> Result<u64> {
        let mut state = self.state.write().await;
        let before = state.records.len();
        state.records.retain(|r| r.tenant_id != tenant_id);
        Ok((before - state.records.len()) as u64)
    }
}
