//! Config store port and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::TenantSlug;

use crate::error::LifecycleError;

/// Trait for tenant-scoped configuration storage.
///
/// Entries are keyed per tenant, with system-wide defaults as a fallback:
/// a `get` that finds no tenant-scoped value returns the system default for
/// the same key, if any.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Looks up a config value for the tenant, falling back to the
    /// system-wide default when the tenant has no entry for the key.
    async fn get(&self, tenant: &TenantSlug, key: &str) -> Result<Option<String>, LifecycleError>;

    /// Sets a tenant-scoped config value.
    async fn set_tenant(
        &self,
        tenant: &TenantSlug,
        key: &str,
        value: &str,
    ) -> Result<(), LifecycleError>;

    /// Sets a system-wide default value.
    async fn set_system_default(&self, key: &str, value: &str) -> Result<(), LifecycleError>;

    /// Removes every tenant-scoped entry for the given tenant.
    ///
    /// Returns the number of entries removed; zero when the tenant has none.
    /// System-wide defaults are never affected.
    async fn delete_tenant_entries(&self, tenant: &TenantSlug) -> Result<u64, LifecycleError>;
}

#[derive(Debug, Default)]
struct InMemoryConfigState {
    tenant_entries: HashMap<TenantSlug, HashMap<String, String>>,
    system_defaults: HashMap<String, String>,
    fail_on_delete: bool,
}

/// In-memory config store for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConfigStore {
    state: Arc<RwLock<InMemoryConfigState>>,
}

impl InMemoryConfigStore {
    /// Creates a new in-memory config store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the store to fail on the next delete call.
    pub fn set_fail_on_delete(&self, fail: bool) {
        self.state.write().unwrap().fail_on_delete = fail;
    }

    /// Returns the number of entries held for the given tenant.
    pub fn entry_count(&self, tenant: &TenantSlug) -> usize {
        self.state
            .read()
            .unwrap()
            .tenant_entries
            .get(tenant)
            .map(|m| m.len())
            .unwrap_or(0)
    }
}

#[async_trait]
impl ConfigStore for InMemoryConfigStore {
    async fn get(&self, tenant: &TenantSlug, key: &str) -> Result<Option<String>, LifecycleError> {
        let state = self.state.read().unwrap();
        let tenant_value = state
            .tenant_entries
            .get(tenant)
            .and_then(|entries| entries.get(key));
        Ok(tenant_value
            .or_else(|| state.system_defaults.get(key))
            .cloned())
    }

    async fn set_tenant(
        &self,
        tenant: &TenantSlug,
        key: &str,
        value: &str,
    ) -> Result<(), LifecycleError> {
        let mut state = self.state.write().unwrap();
        state
            .tenant_entries
            .entry(tenant.clone())
            .or_default()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn set_system_default(&self, key: &str, value: &str) -> Result<(), LifecycleError> {
        let mut state = self.state.write().unwrap();
        state
            .system_defaults
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete_tenant_entries(&self, tenant: &TenantSlug) -> Result<u64, LifecycleError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_delete {
            return Err(LifecycleError::ConfigStore(
                "config backend unavailable".to_string(),
            ));
        }

        let removed = state
            .tenant_entries
            .remove(tenant)
            .map(|entries| entries.len() as u64)
            .unwrap_or(0);
        Ok(removed)
    }
}
