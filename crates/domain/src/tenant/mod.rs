//! Tenant aggregate and related types.

mod aggregate;
mod commands;
mod events;
mod service;
mod state;
mod value_objects;

pub use aggregate::Tenant;
pub use commands::*;
pub use events::{
    TenantActivatedData, TenantConfigUpdatedData, TenantDecommissionedData, TenantEvent,
    TenantProvisionedData, TenantRenamedData, TenantSuspendedData,
};
pub use service::TenantService;
pub use state::TenantStatus;
pub use value_objects::SuspensionCategory;

use thiserror::Error;

/// Errors that can occur during tenant operations.
#[derive(Debug, Error)]
pub enum TenantError {
    /// Tenant is not in the expected status.
    #[error("Invalid state transition: cannot {action} from {current_status} status")]
    InvalidStateTransition {
        current_status: TenantStatus,
        action: &'static str,
    },

    /// Suspension and decommission require a human-readable reason.
    #[error("A non-empty reason is required")]
    EmptyReason,

    /// Display name must not be empty.
    #[error("Display name must not be empty")]
    EmptyName,

    /// The aggregate has already been provisioned.
    #[error("Tenant already provisioned")]
    AlreadyProvisioned,

    /// The command targets a tenant that has never been provisioned.
    #[error("Tenant has not been provisioned")]
    NotProvisioned,
}
