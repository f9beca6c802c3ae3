//! Slug uniqueness registry.
//!
//! Tenant slugs are unique across the system, but uniqueness is a cross-
//! aggregate concern the event log cannot enforce. The registry is the
//! dedicated store for it: a slug is reserved before the provisioning event
//! is appended and released again during cascade cleanup.

pub mod error;
pub mod memory;
pub mod slug_registry;

pub use error::{RegistryError, Result};
pub use memory::InMemorySlugRegistry;
pub use slug_registry::SlugRegistry;
