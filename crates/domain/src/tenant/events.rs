//! Tenant domain events.

use chrono::{DateTime, Utc};
use common::{AggregateId, TenantSlug};
use serde::{Deserialize, Serialize};

use crate::aggregate::DomainEvent;

use super::SuspensionCategory;

/// Events that can occur on a tenant aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum TenantEvent {
    /// Tenant was provisioned.
    TenantProvisioned(TenantProvisionedData),

    /// Tenant was activated.
    TenantActivated(TenantActivatedData),

    /// Tenant was suspended.
    TenantSuspended(TenantSuspendedData),

    /// Tenant was decommissioned.
    TenantDecommissioned(TenantDecommissionedData),

    /// Tenant configuration was replaced.
    TenantConfigUpdated(TenantConfigUpdatedData),

    /// Tenant display name was changed.
    TenantRenamed(TenantRenamedData),
}

impl DomainEvent for TenantEvent {
    fn event_type(&self) -> &'static str {
        match self {
            TenantEvent::TenantProvisioned(_) => "TenantProvisioned",
            TenantEvent::TenantActivated(_) => "TenantActivated",
            TenantEvent::TenantSuspended(_) => "TenantSuspended",
            TenantEvent::TenantDecommissioned(_) => "TenantDecommissioned",
            TenantEvent::TenantConfigUpdated(_) => "TenantConfigUpdated",
            TenantEvent::TenantRenamed(_) => "TenantRenamed",
        }
    }
}

/// Data for TenantProvisioned event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantProvisionedData {
    /// The unique tenant ID.
    pub tenant_id: AggregateId,

    /// The human-readable slug, fixed for the tenant's lifetime.
    pub slug: TenantSlug,

    /// Display name at provisioning time.
    pub display_name: String,

    /// Initial configuration document.
    pub initial_config: serde_json::Value,

    /// When the tenant was provisioned.
    pub provisioned_at: DateTime<Utc>,
}

/// Data for TenantActivated event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantActivatedData {
    /// Who initiated the activation.
    pub initiated_by: String,

    /// When the tenant was activated.
    pub activated_at: DateTime<Utc>,
}

/// Data for TenantSuspended event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantSuspendedData {
    /// Who initiated the suspension.
    pub initiated_by: String,

    /// Human-readable reason for the suspension.
    pub reason: String,

    /// Suspension category for audit filtering.
    pub category: SuspensionCategory,

    /// When the tenant was suspended.
    pub suspended_at: DateTime<Utc>,
}

/// Data for TenantDecommissioned event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantDecommissionedData {
    /// Who initiated the decommissioning.
    pub initiated_by: String,

    /// Human-readable reason for the decommissioning.
    pub reason: String,

    /// When the tenant was decommissioned.
    pub decommissioned_at: DateTime<Utc>,
}

/// Data for TenantConfigUpdated event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantConfigUpdatedData {
    /// The full replacement configuration document.
    pub config: serde_json::Value,

    /// Who updated the configuration.
    pub updated_by: String,

    /// When the configuration was updated.
    pub updated_at: DateTime<Utc>,
}

/// Data for TenantRenamed event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantRenamedData {
    /// The new display name.
    pub new_name: String,

    /// Who renamed the tenant.
    pub renamed_by: String,

    /// When the tenant was renamed.
    pub renamed_at: DateTime<Utc>,
}

// Convenience constructors for events
impl TenantEvent {
    /// Creates a TenantProvisioned event.
    pub fn tenant_provisioned(
        tenant_id: AggregateId,
        slug: TenantSlug,
        display_name: impl Into<String>,
        initial_config: serde_json::Value,
    ) -> Self {
        TenantEvent::TenantProvisioned(TenantProvisionedData {
            tenant_id,
            slug,
            display_name: display_name.into(),
            initial_config,
            provisioned_at: Utc::now(),
        })
    }

    /// Creates a TenantActivated event.
    pub fn tenant_activated(initiated_by: impl Into<String>) -> Self {
        TenantEvent::TenantActivated(TenantActivatedData {
            initiated_by: initiated_by.into(),
            activated_at: Utc::now(),
        })
    }

    /// Creates a TenantSuspended event.
    pub fn tenant_suspended(
        initiated_by: impl Into<String>,
        reason: impl Into<String>,
        category: SuspensionCategory,
    ) -> Self {
        TenantEvent::TenantSuspended(TenantSuspendedData {
            initiated_by: initiated_by.into(),
            reason: reason.into(),
            category,
            suspended_at: Utc::now(),
        })
    }

    /// Creates a TenantDecommissioned event.
    pub fn tenant_decommissioned(
        initiated_by: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        TenantEvent::TenantDecommissioned(TenantDecommissionedData {
            initiated_by: initiated_by.into(),
            reason: reason.into(),
            decommissioned_at: Utc::now(),
        })
    }

    /// Creates a TenantConfigUpdated event.
    pub fn tenant_config_updated(
        config: serde_json::Value,
        updated_by: impl Into<String>,
    ) -> Self {
        TenantEvent::TenantConfigUpdated(TenantConfigUpdatedData {
            config,
            updated_by: updated_by.into(),
            updated_at: Utc::now(),
        })
    }

    /// Creates a TenantRenamed event.
    pub fn tenant_renamed(new_name: impl Into<String>, renamed_by: impl Into<String>) -> Self {
        TenantEvent::TenantRenamed(TenantRenamedData {
            new_name: new_name.into(),
            renamed_by: renamed_by.into(),
            renamed_at: Utc::now(),
        })
    }
}
