//! Decommissioning orchestration and cascade deletion.
//!
//! This crate owns what happens after a tenant's lifecycle ends:
//! - [`CascadeDeletionService`] removes derived data (projection rows, the
//!   slug reservation, config entries) in a fixed, idempotent order
//! - [`DecommissionOrchestrator`] gates the purge on the tenant actually
//!   being decommissioned and also drops the snapshot
//! - [`ConfigStore`] is the port for tenant-scoped configuration with
//!   system-wide fallback defaults

pub mod cascade;
pub mod config;
pub mod decommission;
pub mod error;

pub use cascade::{
    CATEGORY_CONFIG, CATEGORY_PROJECTIONS, CATEGORY_SLUG_RESERVATION, CascadeDeletionResult,
    CascadeDeletionService,
};
pub use config::{ConfigStore, InMemoryConfigStore};
pub use decommission::DecommissionOrchestrator;
pub use error::{LifecycleError, Result};
