//! Registry error types.

use common::{AggregateId, TenantSlug};
use thiserror::Error;

/// Errors that can occur during slug registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The slug is already reserved by a different aggregate.
    #[error("Slug '{slug}' is already reserved by aggregate {held_by}")]
    SlugConflict {
        slug: TenantSlug,
        held_by: AggregateId,
    },

    /// The backing store failed.
    #[error("Registry storage error: {0}")]
    Storage(String),
}

impl RegistryError {
    /// Whether retrying the operation could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, RegistryError::Storage(_))
    }
}

/// Convenience type alias for registry results.
pub type Result<T> = std::result::Result<T, RegistryError>;
