//! Slug registry trait.

use async_trait::async_trait;
use common::{AggregateId, TenantSlug};

use crate::error::Result;

/// Trait for slug reservation stores.
#[async_trait]
pub trait SlugRegistry: Send + Sync {
    /// Reserves a slug for an aggregate.
    ///
    /// Fails with `SlugConflict` if the slug is already held by a different
    /// aggregate. Reserving a slug the same aggregate already holds is a
    /// no-op, so a retried provisioning attempt does not conflict with
    /// itself.
    async fn reserve(&self, slug: &TenantSlug, aggregate_id: AggregateId) -> Result<()>;

    /// Releases a slug reservation.
    ///
    /// Returns true if a reservation was removed, false if the slug was not
    /// reserved. Releasing an unreserved slug is not an error.
    async fn release(&self, slug: &TenantSlug) -> Result<bool>;

    /// Looks up the aggregate holding a slug, if any.
    async fn lookup(&self, slug: &TenantSlug) -> Result<Option<AggregateId>>;
}
