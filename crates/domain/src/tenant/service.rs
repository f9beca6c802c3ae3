//! Tenant service providing a simplified API for tenant operations.

use common::{AggregateId, TenantSlug};
use event_store::EventStore;
use registry::SlugRegistry;

use crate::aggregate::Aggregate;
use crate::command::{CommandHandler, CommandResult};
use crate::error::DomainError;

use super::{
    ActivateTenant, DecommissionTenant, ProvisionTenant, RenameTenant, SuspendTenant, Tenant,
    UpdateTenantConfig,
};

impl From<super::TenantError> for DomainError {
    fn from(e: super::TenantError) -> Self {
        DomainError::Tenant(e)
    }
}

/// Service for managing tenants.
///
/// Provides a high-level API for tenant operations, wrapping the command
/// handler and the slug registry. All collaborators are injected at
/// construction time.
pub struct TenantService<S: EventStore, R: SlugRegistry> {
    handler: CommandHandler<S, Tenant>,
    registry: R,
}

impl<S: EventStore, R: SlugRegistry> TenantService<S, R> {
    /// Creates a new tenant service with the given event store and slug registry.
    pub fn new(store: S, registry: R) -> Self {
        Self {
            handler: CommandHandler::new(store),
            registry,
        }
    }

    /// Returns a reference to the underlying command handler.
    pub fn handler(&self) -> &CommandHandler<S, Tenant> {
        &self.handler
    }

    /// Returns a reference to the slug registry.
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Provisions a new tenant.
    ///
    /// The slug is reserved in the registry before the provisioning event is
    /// appended, so two concurrent provisions with the same slug cannot both
    /// succeed. If the append fails after the reservation was taken, the
    /// reservation is released best-effort.
    #[tracing::instrument(skip(self, cmd), fields(slug = %cmd.slug))]
    pub async fn provision_tenant(
        &self,
        cmd: ProvisionTenant,
    ) -> Result<CommandResult<Tenant>, DomainError> {
        let tenant_id = cmd.tenant_id;
        let slug = cmd.slug.clone();

        self.registry.reserve(&slug, tenant_id).await?;

        let result = self
            .handler
            .execute_with_snapshot(tenant_id, |tenant| {
                tenant.provision(
                    cmd.tenant_id,
                    cmd.slug,
                    cmd.display_name,
                    cmd.initial_config,
                )
            })
            .await;

        if result.is_err() {
            // The event was never appended, so the reservation must not
            // outlive this attempt. A failed release leaves a dangling
            // reservation that cascade deletion will clean up later.
            if let Err(release_err) = self.registry.release(&slug).await {
                tracing::warn!(
                    slug = %slug,
                    error = %release_err,
                    "failed to release slug reservation after provisioning failure"
                );
            }
        }

        result
    }

    /// Activates a tenant.
    #[tracing::instrument(skip(self))]
    pub async fn activate_tenant(
        &self,
        cmd: ActivateTenant,
    ) -> Result<CommandResult<Tenant>, DomainError> {
        let initiated_by = cmd.initiated_by.clone();

        self.handler
            .execute_with_snapshot(cmd.tenant_id, |tenant| {
                tenant.request_activate(initiated_by)
            })
            .await
    }

    /// Suspends a tenant.
    #[tracing::instrument(skip(self))]
    pub async fn suspend_tenant(
        &self,
        cmd: SuspendTenant,
    ) -> Result<CommandResult<Tenant>, DomainError> {
        let initiated_by = cmd.initiated_by.clone();
        let reason = cmd.reason.clone();
        let category = cmd.category;

        self.handler
            .execute_with_snapshot(cmd.tenant_id, |tenant| {
                tenant.request_suspend(initiated_by, reason, category)
            })
            .await
    }

    /// Decommissions a tenant.
    #[tracing::instrument(skip(self))]
    pub async fn decommission_tenant(
        &self,
        cmd: DecommissionTenant,
    ) -> Result<CommandResult<Tenant>, DomainError> {
        let initiated_by = cmd.initiated_by.clone();
        let reason = cmd.reason.clone();

        self.handler
            .execute_with_snapshot(cmd.tenant_id, |tenant| {
                tenant.request_decommission(initiated_by, reason)
            })
            .await
    }

    /// Replaces a tenant's configuration document.
    #[tracing::instrument(skip(self, cmd), fields(tenant_id = %cmd.tenant_id))]
    pub async fn update_tenant_config(
        &self,
        cmd: UpdateTenantConfig,
    ) -> Result<CommandResult<Tenant>, DomainError> {
        let config = cmd.config.clone();
        let updated_by = cmd.updated_by.clone();

        self.handler
            .execute_with_snapshot(cmd.tenant_id, |tenant| {
                tenant.update_config(config, updated_by)
            })
            .await
    }

    /// Changes a tenant's display name.
    #[tracing::instrument(skip(self))]
    pub async fn rename_tenant(
        &self,
        cmd: RenameTenant,
    ) -> Result<CommandResult<Tenant>, DomainError> {
        let new_name = cmd.new_name.clone();
        let renamed_by = cmd.renamed_by.clone();

        self.handler
            .execute_with_snapshot(cmd.tenant_id, |tenant| tenant.rename(new_name, renamed_by))
            .await
    }

    /// Loads a tenant by ID, failing if it doesn't exist.
    #[tracing::instrument(skip(self))]
    pub async fn get_tenant(&self, tenant_id: AggregateId) -> Result<Tenant, DomainError> {
        self.find_tenant(tenant_id)
            .await?
            .ok_or(DomainError::AggregateNotFound {
                aggregate_type: Tenant::aggregate_type(),
                aggregate_id: tenant_id.to_string(),
            })
    }

    /// Loads a tenant by ID.
    ///
    /// Returns None if the tenant doesn't exist.
    #[tracing::instrument(skip(self))]
    pub async fn find_tenant(&self, tenant_id: AggregateId) -> Result<Option<Tenant>, DomainError> {
        self.handler.load_existing(tenant_id).await
    }

    /// Looks up a tenant by slug via the registry.
    #[tracing::instrument(skip(self, slug), fields(slug = %slug))]
    pub async fn find_by_slug(&self, slug: &TenantSlug) -> Result<Option<Tenant>, DomainError> {
        match self.registry.lookup(slug).await? {
            Some(tenant_id) => self.find_tenant(tenant_id).await,
            None => Ok(None),
        }
    }
}
