//! Tenant aggregate implementation.

use common::{AggregateId, TenantSlug};
use event_store::Version;
use serde::{Deserialize, Serialize};

use crate::aggregate::{Aggregate, SnapshotCapable};

use super::{
    SuspensionCategory, TenantError, TenantEvent, TenantStatus,
    events::{
        TenantConfigUpdatedData, TenantProvisionedData, TenantRenamedData, TenantSuspendedData,
    },
};

/// The most recent suspension, kept for audit surfacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuspensionRecord {
    /// Reason given when the tenant was suspended.
    pub reason: String,
    /// Category of the suspension.
    pub category: SuspensionCategory,
}

/// Tenant aggregate root.
///
/// Represents a tenant in the control plane with its full lifecycle from
/// provisioning to decommissioning. State is a pure fold over the event
/// stream; command methods are synchronous, side-effect-free, and emit
/// exactly one event each.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tenant {
    /// Unique tenant identifier.
    id: Option<AggregateId>,

    /// Current version for optimistic concurrency.
    #[serde(default)]
    version: Version,

    /// Human-readable slug, immutable once provisioned.
    slug: Option<TenantSlug>,

    /// Display name.
    name: String,

    /// Current lifecycle status.
    status: TenantStatus,

    /// Opaque configuration document.
    config: serde_json::Value,

    /// Most recent suspension, if the tenant was ever suspended.
    last_suspension: Option<SuspensionRecord>,
}

impl Aggregate for Tenant {
    type Event = TenantEvent;
    type Error = TenantError;

    fn aggregate_type() -> &'static str {
        "Tenant"
    }

    fn id(&self) -> Option<AggregateId> {
        self.id
    }

    fn version(&self) -> Version {
        self.version
    }

    fn set_version(&mut self, version: Version) {
        self.version = version;
    }

    fn apply(&mut self, event: Self::Event) {
        match event {
            TenantEvent::TenantProvisioned(data) => self.apply_provisioned(data),
            TenantEvent::TenantActivated(_) => {
                self.status = TenantStatus::Active;
            }
            TenantEvent::TenantSuspended(data) => self.apply_suspended(data),
            TenantEvent::TenantDecommissioned(_) => {
                self.status = TenantStatus::Decommissioned;
            }
            TenantEvent::TenantConfigUpdated(data) => self.apply_config_updated(data),
            TenantEvent::TenantRenamed(data) => self.apply_renamed(data),
        }
    }
}

impl SnapshotCapable for Tenant {
    fn snapshot_interval() -> usize {
        50 // Snapshot every 50 events
    }
}

// Query methods
impl Tenant {
    /// Returns the tenant's slug.
    pub fn slug(&self) -> Option<&TenantSlug> {
        self.slug.as_ref()
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the current lifecycle status.
    pub fn status(&self) -> TenantStatus {
        self.status
    }

    /// Returns the configuration document.
    pub fn config(&self) -> &serde_json::Value {
        &self.config
    }

    /// Returns the most recent suspension record, if any.
    pub fn last_suspension(&self) -> Option<&SuspensionRecord> {
        self.last_suspension.as_ref()
    }

    /// Returns true if the tenant is in a terminal status.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

// Command methods (return events)
impl Tenant {
    /// Provisions a new tenant.
    pub fn provision(
        &self,
        tenant_id: AggregateId,
        slug: TenantSlug,
        display_name: impl Into<String>,
        initial_config: serde_json::Value,
    ) -> Result<Vec<TenantEvent>, TenantError> {
        if self.id.is_some() {
            return Err(TenantError::AlreadyProvisioned);
        }

        let display_name = display_name.into();
        if display_name.trim().is_empty() {
            return Err(TenantError::EmptyName);
        }

        Ok(vec![TenantEvent::tenant_provisioned(
            tenant_id,
            slug,
            display_name,
            initial_config,
        )])
    }

    /// Requests activation of the tenant.
    pub fn request_activate(
        &self,
        initiated_by: impl Into<String>,
    ) -> Result<Vec<TenantEvent>, TenantError> {
        self.ensure_provisioned()?;

        if !self.status.can_activate() {
            return Err(TenantError::InvalidStateTransition {
                current_status: self.status,
                action: "activate",
            });
        }

        Ok(vec![TenantEvent::tenant_activated(initiated_by)])
    }

    /// Requests suspension of the tenant.
    pub fn request_suspend(
        &self,
        initiated_by: impl Into<String>,
        reason: impl Into<String>,
        category: SuspensionCategory,
    ) -> Result<Vec<TenantEvent>, TenantError> {
        self.ensure_provisioned()?;

        if !self.status.can_suspend() {
            return Err(TenantError::InvalidStateTransition {
                current_status: self.status,
                action: "suspend",
            });
        }

        let reason = reason.into();
        if reason.trim().is_empty() {
            return Err(TenantError::EmptyReason);
        }

        Ok(vec![TenantEvent::tenant_suspended(
            initiated_by,
            reason,
            category,
        )])
    }

    /// Requests decommissioning of the tenant.
    pub fn request_decommission(
        &self,
        initiated_by: impl Into<String>,
        reason: impl Into<String>,
    ) -> Result<Vec<TenantEvent>, TenantError> {
        self.ensure_provisioned()?;

        if !self.status.can_decommission() {
            return Err(TenantError::InvalidStateTransition {
                current_status: self.status,
                action: "decommission",
            });
        }

        let reason = reason.into();
        if reason.trim().is_empty() {
            return Err(TenantError::EmptyReason);
        }

        Ok(vec![TenantEvent::tenant_decommissioned(
            initiated_by,
            reason,
        )])
    }

    /// Replaces the tenant's configuration document.
    pub fn update_config(
        &self,
        config: serde_json::Value,
        updated_by: impl Into<String>,
    ) -> Result<Vec<TenantEvent>, TenantError> {
        self.ensure_provisioned()?;

        if self.status.is_terminal() {
            return Err(TenantError::InvalidStateTransition {
                current_status: self.status,
                action: "update config",
            });
        }

        Ok(vec![TenantEvent::tenant_config_updated(config, updated_by)])
    }

    /// Changes the tenant's display name.
    pub fn rename(
        &self,
        new_name: impl Into<String>,
        renamed_by: impl Into<String>,
    ) -> Result<Vec<TenantEvent>, TenantError> {
        self.ensure_provisioned()?;

        if self.status.is_terminal() {
            return Err(TenantError::InvalidStateTransition {
                current_status: self.status,
                action: "rename",
            });
        }

        let new_name = new_name.into();
        if new_name.trim().is_empty() {
            return Err(TenantError::EmptyName);
        }

        Ok(vec![TenantEvent::tenant_renamed(new_name, renamed_by)])
    }

    fn ensure_provisioned(&self) -> Result<(), TenantError> {
        if self.id.is_none() {
            return Err(TenantError::NotProvisioned);
        }
        Ok(())
    }
}

// Apply event helpers
impl Tenant {
    fn apply_provisioned(&mut self, data: TenantProvisionedData) {
        self.id = Some(data.tenant_id);
        self.slug = Some(data.slug);
        self.name = data.display_name;
        self.config = data.initial_config;
        self.status = TenantStatus::Provisioning;
    }

    fn apply_suspended(&mut self, data: TenantSuspendedData) {
        self.status = TenantStatus::Suspended;
        self.last_suspension = Some(SuspensionRecord {
            reason: data.reason,
            category: data.category,
        });
    }

    fn apply_config_updated(&mut self, data: TenantConfigUpdatedData) {
        self.config = data.config;
    }

    fn apply_renamed(&mut self, data: TenantRenamedData) {
        self.name = data.new_name;
    }
}
