//! In-memory slug registry implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::{AggregateId, TenantSlug};

use crate::error::{RegistryError, Result};
use crate::slug_registry::SlugRegistry;

#[derive(Debug, Default)]
struct InMemoryRegistryState {
    reservations: HashMap<TenantSlug, AggregateId>,
    fail_on_reserve: bool,
    fail_on_release: bool,
}

/// In-memory slug registry for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemorySlugRegistry {
    state: Arc<RwLock<InMemoryRegistryState>>,
}

impl InMemorySlugRegistry {
    /// Creates a new empty in-memory slug registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the registry to fail on the next reserve call.
    pub fn set_fail_on_reserve(&self, fail: bool) {
        self.state.write().unwrap().fail_on_reserve = fail;
    }

    /// Configures the registry to fail on the next release call.
    pub fn set_fail_on_release(&self, fail: bool) {
        self.state.write().unwrap().fail_on_release = fail;
    }

    /// Returns the number of active reservations.
    pub fn reservation_count(&self) -> usize {
        self.state.read().unwrap().reservations.len()
    }
}

#[async_trait]
impl SlugRegistry for InMemorySlugRegistry {
    async fn reserve(&self, slug: &TenantSlug, aggregate_id: AggregateId) -> Result<()> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_reserve {
            return Err(RegistryError::Storage(
                "registry unavailable".to_string(),
            ));
        }

        if let Some(&held_by) = state.reservations.get(slug) {
            if held_by == aggregate_id {
                return Ok(());
            }
            return Err(RegistryError::SlugConflict {
                slug: slug.clone(),
                held_by,
            });
        }

        state.reservations.insert(slug.clone(), aggregate_id);
        Ok(())
    }

    async fn release(&self, slug: &TenantSlug) -> Result<bool> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_release {
            return Err(RegistryError::Storage(
                "registry unavailable".to_string(),
            ));
        }

        Ok(state.reservations.remove(slug).is_some())
    }

    async fn lookup(&self, slug: &TenantSlug) -> Result<Option<AggregateId>> {
        let state = self.state.read().unwrap();
        Ok(state.reservations.get(slug).copied())
    }
}
