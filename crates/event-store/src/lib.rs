//! Append-only event store abstraction.
//!
//! The event log is the single source of truth for every aggregate: state is
//! reconstructed by replaying the ordered event stream, optionally starting
//! from a snapshot. Appends are guarded by optimistic concurrency control —
//! a save succeeds only when the caller's expected version matches the
//! store's current version for that aggregate.

pub mod error;
pub mod event;
pub mod memory;
pub mod postgres;
pub mod snapshot;
pub mod store;

pub use common::AggregateId;
pub use error::{EventStoreError, Result};
pub use event::{EventEnvelope, EventEnvelopeBuilder, EventId, Version};
pub use memory::InMemoryEventStore;
pub use postgres::PostgresEventStore;
pub use snapshot::Snapshot;
pub use store::{AppendOptions, EventStore, EventStoreExt, EventStream};
