//! Shared identifier types used across the control plane.
//!
//! - [`AggregateId`]: opaque identity of an event-sourced aggregate
//! - [`TenantSlug`]: validated human-readable tenant identifier

pub mod slug;
pub mod types;

pub use slug::{SlugError, TenantSlug};
pub use types::AggregateId;
