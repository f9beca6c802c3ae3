//! Domain layer for the tenant control plane.
//!
//! This crate provides the core domain abstractions including:
//! - Aggregate trait for event-sourced entities
//! - DomainEvent trait for domain events
//! - Command trait and CommandHandler for command processing
//! - Principal value object for authenticated callers
//! - Tenant aggregate implementation with lifecycle state machine

pub mod aggregate;
pub mod command;
pub mod error;
pub mod principal;
pub mod tenant;

pub use aggregate::{Aggregate, DomainEvent, SnapshotCapable};
pub use command::{Command, CommandHandler, CommandResult};
pub use error::DomainError;
pub use principal::{Principal, PrincipalKind};
pub use tenant::{
    ActivateTenant, DecommissionTenant, ProvisionTenant, RenameTenant, SuspendTenant,
    SuspensionCategory, Tenant, TenantError, TenantEvent, TenantService, TenantStatus,
    UpdateTenantConfig,
};
