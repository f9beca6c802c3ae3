//! Tenant lifecycle state machine.

use serde::{Deserialize, Serialize};

/// The status of a tenant in its lifecycle.
///
/// State transitions:
/// ```text
/// Provisioning ──► Active ◄──► Suspended
///       │             │            │
///       └─────────────┴────────────┴──► (Active|Suspended) ──► Decommissioned
/// ```
///
/// Activation is allowed from Provisioning and Suspended; suspension only
/// from Active; decommissioning from Active or Suspended. Decommissioned is
/// terminal: nothing leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TenantStatus {
    /// Tenant is being set up, not yet serving traffic.
    #[default]
    Provisioning,

    /// Tenant is live.
    Active,

    /// Tenant is temporarily disabled.
    Suspended,

    /// Tenant has been retired (terminal state).
    Decommissioned,
}

impl TenantStatus {
    /// Returns true if the tenant can be activated from this status.
    pub fn can_activate(&self) -> bool {
        matches!(self, TenantStatus::Provisioning | TenantStatus::Suspended)
    }

    /// Returns true if the tenant can be suspended from this status.
    pub fn can_suspend(&self) -> bool {
        matches!(self, TenantStatus::Active)
    }

    /// Returns true if the tenant can be decommissioned from this status.
    pub fn can_decommission(&self) -> bool {
        matches!(self, TenantStatus::Active | TenantStatus::Suspended)
    }

    /// Returns true if this is a terminal status (no further transitions possible).
    pub fn is_terminal(&self) -> bool {
        matches!(self, TenantStatus::Decommissioned)
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            TenantStatus::Provisioning => "Provisioning",
            TenantStatus::Active => "Active",
            TenantStatus::Suspended => "Suspended",
            TenantStatus::Decommissioned => "Decommissioned",
        }
    }
}

impl std::fmt::Display for TenantStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
