//! Read model views for the tenant control plane.

pub mod lifecycle_audit;
pub mod tenant_directory;

pub use lifecycle_audit::{LifecycleAction, LifecycleAuditRecord, LifecycleAuditView};
pub use tenant_directory::{TenantDirectoryEntry, TenantDirectoryView};
