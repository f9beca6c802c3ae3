//! Read model traits for query-side views.

use async_trait::async_trait;
use common::AggregateId;

use crate::Result;

/// A read model providing query access to denormalized data.
///
/// Read models are the query-side data structures in CQRS.
/// They are updated by projections and optimized for fast reads.
pub trait ReadModel: Send + Sync {
    /// Returns the name of this read model.
    fn name(&self) -> &'static str;

    /// Returns the number of entries in this read model.
    fn count(&self) -> usize;
}

/// A store holding rows scoped to a single tenant.
///
/// Cascade deletion walks every registered store and removes the rows
/// belonging to the tenant being purged. Deletion must be idempotent:
/// deleting rows for a tenant with no rows is a successful no-op.
#[async_trait]
pub trait TenantScopedStore: Send + Sync {
    /// Returns the name of this store for audit reporting.
    fn store_name(&self) -> &'static str;

    /// Deletes all rows belonging to the given tenant.
    ///
    /// Returns the number of rows removed. Returns zero when the tenant
    /// has no rows in this store.
    async fn delete_by_aggregate(&self, tenant_id: AggregateId) -> Result<u64>;
}
