//! Tenant commands.

use common::{AggregateId, TenantSlug};

use crate::command::Command;

use super::{SuspensionCategory, Tenant};

/// Command to provision a new tenant.
#[derive(Debug, Clone)]
pub struct ProvisionTenant {
    /// The tenant ID to create.
    pub tenant_id: AggregateId,

    /// The slug to reserve for the tenant.
    pub slug: TenantSlug,

    /// Display name.
    pub display_name: String,

    /// Initial configuration document.
    pub initial_config: serde_json::Value,
}

impl ProvisionTenant {
    /// Creates a new ProvisionTenant command.
    pub fn new(
        tenant_id: AggregateId,
        slug: TenantSlug,
        display_name: impl Into<String>,
        initial_config: serde_json::Value,
    ) -> Self {
        Self {
            tenant_id,
            slug,
            display_name: display_name.into(),
            initial_config,
        }
    }

    /// Creates a new ProvisionTenant command with a generated tenant ID.
    pub fn with_slug(slug: TenantSlug, display_name: impl Into<String>) -> Self {
        Self {
            tenant_id: AggregateId::new(),
            slug,
            display_name: display_name.into(),
            initial_config: serde_json::json!({}),
        }
    }
}

impl Command for ProvisionTenant {
    type Aggregate = Tenant;

    fn aggregate_id(&self) -> AggregateId {
        self.tenant_id
    }
}

/// Command to activate a tenant.
#[derive(Debug, Clone)]
pub struct ActivateTenant {
    /// The tenant to activate.
    pub tenant_id: AggregateId,

    /// Who initiated the activation.
    pub initiated_by: String,
}

impl ActivateTenant {
    /// Creates a new ActivateTenant command.
    pub fn new(tenant_id: AggregateId, initiated_by: impl Into<String>) -> Self {
        Self {
            tenant_id,
            initiated_by: initiated_by.into(),
        }
    }
}

impl Command for ActivateTenant {
    type Aggregate = Tenant;

    fn aggregate_id(&self) -> AggregateId {
        self.tenant_id
    }
}

/// Command to suspend a tenant.
#[derive(Debug, Clone)]
pub struct SuspendTenant {
    /// The tenant to suspend.
    pub tenant_id: AggregateId,

    /// Who initiated the suspension.
    pub initiated_by: String,

    /// Reason for the suspension.
    pub reason: String,

    /// Suspension category.
    pub category: SuspensionCategory,
}

impl SuspendTenant {
    /// Creates a new SuspendTenant command.
    pub fn new(
        tenant_id: AggregateId,
        initiated_by: impl Into<String>,
        reason: impl Into<String>,
        category: SuspensionCategory,
    ) -> Self {
        Self {
            tenant_id,
            initiated_by: initiated_by.into(),
            reason: reason.into(),
            category,
        }
    }
}

impl Command for SuspendTenant {
    type Aggregate = Tenant;

    fn aggregate_id(&self) -> AggregateId {
        self.tenant_id
    }
}

/// Command to decommission a tenant.
#[derive(Debug, Clone)]
pub struct DecommissionTenant {
    /// The tenant to decommission.
    pub tenant_id: AggregateId,

    /// Who initiated the decommissioning.
    pub initiated_by: String,

    /// Reason for the decommissioning.
    pub reason: String,
}

impl DecommissionTenant {
    /// Creates a new DecommissionTenant command.
    pub fn new(
        tenant_id: AggregateId,
        initiated_by: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id,
            initiated_by: initiated_by.into(),
            reason: reason.into(),
        }
    }
}

impl Command for DecommissionTenant {
    type Aggregate = Tenant;

    fn aggregate_id(&self) -> AggregateId {
        self.tenant_id
    }
}

/// Command to replace a tenant's configuration document.
#[derive(Debug, Clone)]
pub struct UpdateTenantConfig {
    /// The tenant to update.
    pub tenant_id: AggregateId,

    /// The full replacement configuration.
    pub config: serde_json::Value,

    /// Who updated the configuration.
    pub updated_by: String,
}

impl UpdateTenantConfig {
    /// Creates a new UpdateTenantConfig command.
    pub fn new(
        tenant_id: AggregateId,
        config: serde_json::Value,
        updated_by: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id,
            config,
            updated_by: updated_by.into(),
        }
    }
}

impl Command for UpdateTenantConfig {
    type Aggregate = Tenant;

    fn aggregate_id(&self) -> AggregateId {
        self.tenant_id
    }
}

/// Command to change a tenant's display name.
#[derive(Debug, Clone)]
pub struct RenameTenant {
    /// The tenant to rename.
    pub tenant_id: AggregateId,

    /// The new display name.
    pub new_name: String,

    /// Who renamed the tenant.
    pub renamed_by: String,
}

impl RenameTenant {
    /// Creates a new RenameTenant command.
    pub fn new(
        tenant_id: AggregateId,
        new_name: impl Into<String>,
        renamed_by: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id,
            new_name: new_name.into(),
            renamed_by: renamed_by.into(),
        }
    }
}

impl Command for RenameTenant {
    type Aggregate = Tenant;

    fn aggregate_id(&self) -> AggregateId {
        self.tenant_id
    }
}
