//! Read models and projections for the tenant control plane query side.
//!
//! This crate provides the query side of the CQRS pattern:
//! - [`Projection`] trait for processing events into read models
//! - [`ReadModel`] trait for query access to denormalized data
//! - [`TenantScopedStore`] trait for tenant-scoped row deletion during purge
//! - [`ProjectionProcessor`] for feeding events from the store to projections
//! - Two read model views: the tenant directory and the lifecycle audit trail

pub mod error;
pub mod processor;
pub mod projection;
pub mod read_model;
pub mod views;

pub use error::{ProjectionError, Result};
pub use processor::ProjectionProcessor;
pub use projection::{Projection, ProjectionPosition};
pub use read_model::{ReadModel, TenantScopedStore};
pub use views::{
    LifecycleAction, LifecycleAuditRecord, LifecycleAuditView, TenantDirectoryEntry,
    TenantDirectoryView,
};
