//! Integration tests for the Tenant aggregate.
//!
//! These tests verify the full tenant lifecycle including event persistence,
//! aggregate reconstruction, slug registration, and concurrency handling.

use common::{AggregateId, TenantSlug};
use domain::{
    ActivateTenant, Aggregate, DecommissionTenant, DomainError, DomainEvent, ProvisionTenant,
    RenameTenant, SuspendTenant, SuspensionCategory, TenantError, TenantEvent, TenantService,
    TenantStatus, UpdateTenantConfig,
};
use event_store::{EventStore, EventStoreError, InMemoryEventStore, Version};
use registry::{InMemorySlugRegistry, RegistryError};

fn slug(s: &str) -> TenantSlug {
    TenantSlug::parse(s).unwrap()
}

/// Helper to create a test tenant service
fn create_service() -> TenantService<InMemoryEventStore, InMemorySlugRegistry> {
    TenantService::new(InMemoryEventStore::new(), InMemorySlugRegistry::new())
}

mod tenant_lifecycle {
    use super::*;

    #[tokio::test]
    async fn complete_tenant_lifecycle() {
        let service = create_service();

        // Provision tenant
        let cmd = ProvisionTenant::new(
            AggregateId::new(),
            slug("acme-corp"),
            "Acme Corp",
            serde_json::json!({"tier": "free"}),
        );
        let tenant_id = cmd.tenant_id;

        let result = service.provision_tenant(cmd).await.unwrap();
        assert_eq!(result.aggregate.status(), TenantStatus::Provisioning);
        assert_eq!(result.new_version, Version::first());

        // Activate
        let result = service
            .activate_tenant(ActivateTenant::new(tenant_id, "system"))
            .await
            .unwrap();
        assert_eq!(result.aggregate.status(), TenantStatus::Active);
        assert_eq!(result.new_version, Version::new(2));

        // Suspend
        let result = service
            .suspend_tenant(SuspendTenant::new(
                tenant_id,
                "ops",
                "planned database migration",
                SuspensionCategory::Maintenance,
            ))
            .await
            .unwrap();
        assert_eq!(result.aggregate.status(), TenantStatus::Suspended);
        let record = result.aggregate.last_suspension().unwrap();
        assert_eq!(record.reason, "planned database migration");
        assert_eq!(record.category, SuspensionCategory::Maintenance);

        // Decommission
        let result = service
            .decommission_tenant(DecommissionTenant::new(tenant_id, "ops", "customer churn"))
            .await
            .unwrap();
        assert_eq!(result.aggregate.status(), TenantStatus::Decommissioned);
        assert!(result.aggregate.is_terminal());
        assert_eq!(result.new_version, Version::new(4));
    }

    #[tokio::test]
    async fn reactivation_after_suspension() {
        let service = create_service();

        let cmd = ProvisionTenant::with_slug(slug("acme-corp"), "Acme Corp");
        let tenant_id = cmd.tenant_id;
        service.provision_tenant(cmd).await.unwrap();

        service
            .activate_tenant(ActivateTenant::new(tenant_id, "system"))
            .await
            .unwrap();

        service
            .suspend_tenant(SuspendTenant::new(
                tenant_id,
                "billing",
                "unpaid invoice",
                SuspensionCategory::Billing,
            ))
            .await
            .unwrap();

        // Paying the invoice brings the tenant back.
        let result = service
            .activate_tenant(ActivateTenant::new(tenant_id, "billing"))
            .await
            .unwrap();
        assert_eq!(result.aggregate.status(), TenantStatus::Active);

        // The suspension record survives reactivation for audit purposes.
        assert!(result.aggregate.last_suspension().is_some());
    }

    #[tokio::test]
    async fn aggregate_reconstruction_from_events() {
        let store = InMemoryEventStore::new();
        let service = TenantService::new(store.clone(), InMemorySlugRegistry::new());

        let cmd = ProvisionTenant::new(
            AggregateId::new(),
            slug("acme-corp"),
            "Acme Corp",
            serde_json::json!({"tier": "free"}),
        );
        let tenant_id = cmd.tenant_id;
        service.provision_tenant(cmd).await.unwrap();

        service
            .update_tenant_config(UpdateTenantConfig::new(
                tenant_id,
                serde_json::json!({"tier": "pro", "seats": 25}),
                "admin",
            ))
            .await
            .unwrap();

        service
            .rename_tenant(RenameTenant::new(tenant_id, "Acme Corporation", "admin"))
            .await
            .unwrap();

        service
            .activate_tenant(ActivateTenant::new(tenant_id, "system"))
            .await
            .unwrap();

        // Load and verify the aggregate is correctly reconstructed
        let tenant = service.get_tenant(tenant_id).await.unwrap();

        assert_eq!(tenant.id(), Some(tenant_id));
        assert_eq!(tenant.slug(), Some(&slug("acme-corp")));
        assert_eq!(tenant.name(), "Acme Corporation");
        assert_eq!(tenant.status(), TenantStatus::Active);
        assert_eq!(
            tenant.config(),
            &serde_json::json!({"tier": "pro", "seats": 25})
        );
        assert_eq!(tenant.version(), Version::new(4));
    }

    #[tokio::test]
    async fn find_by_slug_resolves_through_registry() {
        let service = create_service();

        let cmd = ProvisionTenant::with_slug(slug("acme-corp"), "Acme Corp");
        let tenant_id = cmd.tenant_id;
        service.provision_tenant(cmd).await.unwrap();

        let tenant = service.find_by_slug(&slug("acme-corp")).await.unwrap();
        assert_eq!(tenant.unwrap().id(), Some(tenant_id));

        let missing = service.find_by_slug(&slug("nobody-home")).await.unwrap();
        assert!(missing.is_none());
    }
}

mod slug_registration {
    use super::*;

    #[tokio::test]
    async fn duplicate_slug_rejected() {
        let service = create_service();

        service
            .provision_tenant(ProvisionTenant::with_slug(slug("acme-corp"), "Acme Corp"))
            .await
            .unwrap();

        let result = service
            .provision_tenant(ProvisionTenant::with_slug(
                slug("acme-corp"),
                "Impostor Corp",
            ))
            .await;

        assert!(matches!(
            result,
            Err(DomainError::Registry(RegistryError::SlugConflict { .. }))
        ));
    }

    #[tokio::test]
    async fn reservation_released_when_provisioning_fails() {
        let service = create_service();

        // Empty display name fails domain validation after the slug was reserved.
        let result = service
            .provision_tenant(ProvisionTenant::with_slug(slug("acme-corp"), ""))
            .await;
        assert!(matches!(
            result,
            Err(DomainError::Tenant(TenantError::EmptyName))
        ));

        // The slug is free for the next caller.
        let result = service
            .provision_tenant(ProvisionTenant::with_slug(slug("acme-corp"), "Acme Corp"))
            .await;
        assert!(result.is_ok());
    }
}

mod concurrency {
    use super::*;
    use event_store::{AppendOptions, EventEnvelope};

    #[tokio::test]
    async fn concurrent_modifications_detected() {
        let store = InMemoryEventStore::new();

        let tenant_id = AggregateId::new();

        // Provision tenant
        let event = TenantEvent::tenant_provisioned(
            tenant_id,
            slug("acme-corp"),
            "Acme Corp",
            serde_json::json!({}),
        );
        let envelope = EventEnvelope::builder()
            .aggregate_id(tenant_id)
            .aggregate_type("Tenant")
            .event_type(event.event_type())
            .version(Version::first())
            .payload(&event)
            .unwrap()
            .build();

        store
            .append(vec![envelope], AppendOptions::expect_new())
            .await
            .unwrap();

        // Simulate two concurrent writes both expecting version 1
        // First write succeeds
        let event1 = TenantEvent::tenant_activated("writer-a");
        let envelope1 = EventEnvelope::builder()
            .aggregate_id(tenant_id)
            .aggregate_type("Tenant")
            .event_type(event1.event_type())
            .version(Version::new(2))
            .payload(&event1)
            .unwrap()
            .build();

        store
            .append(
                vec![envelope1],
                AppendOptions::expect_version(Version::first()),
            )
            .await
            .unwrap();

        // Second write should fail - same expected version but data has changed
        let event2 = TenantEvent::tenant_renamed("Acme Corporation", "writer-b");
        let envelope2 = EventEnvelope::builder()
            .aggregate_id(tenant_id)
            .aggregate_type("Tenant")
            .event_type(event2.event_type())
            .version(Version::new(2))
            .payload(&event2)
            .unwrap()
            .build();

        let result = store
            .append(
                vec![envelope2],
                AppendOptions::expect_version(Version::first()),
            )
            .await;

        // Should fail due to concurrency conflict
        assert!(matches!(
            result,
            Err(EventStoreError::ConcurrencyConflict { .. })
        ));
    }

    #[tokio::test]
    async fn retry_after_concurrency_conflict() {
        let service = create_service();

        let cmd = ProvisionTenant::with_slug(slug("acme-corp"), "Acme Corp");
        let tenant_id = cmd.tenant_id;
        service.provision_tenant(cmd).await.unwrap();

        // Two sequential commands both succeed because each reloads first.
        service
            .activate_tenant(ActivateTenant::new(tenant_id, "system"))
            .await
            .unwrap();

        let result = service
            .suspend_tenant(SuspendTenant::new(
                tenant_id,
                "admin",
                "late payment",
                SuspensionCategory::Billing,
            ))
            .await
            .unwrap();

        assert_eq!(result.aggregate.status(), TenantStatus::Suspended);
        assert_eq!(result.new_version, Version::new(3));
    }
}

mod error_handling {
    use super::*;

    #[tokio::test]
    async fn cannot_suspend_provisioning_tenant() {
        let service = create_service();

        let cmd = ProvisionTenant::with_slug(slug("acme-corp"), "Acme Corp");
        let tenant_id = cmd.tenant_id;
        service.provision_tenant(cmd).await.unwrap();

        // Suspension is only valid from Active.
        let result = service
            .suspend_tenant(SuspendTenant::new(
                tenant_id,
                "admin",
                "too eager",
                SuspensionCategory::Other,
            ))
            .await;

        assert!(matches!(
            result,
            Err(DomainError::Tenant(
                TenantError::InvalidStateTransition { .. }
            ))
        ));
    }

    #[tokio::test]
    async fn decommissioned_tenant_rejects_everything() {
        let service = create_service();

        let cmd = ProvisionTenant::with_slug(slug("acme-corp"), "Acme Corp");
        let tenant_id = cmd.tenant_id;
        service.provision_tenant(cmd).await.unwrap();

        service
            .activate_tenant(ActivateTenant::new(tenant_id, "system"))
            .await
            .unwrap();

        service
            .decommission_tenant(DecommissionTenant::new(tenant_id, "ops", "customer churn"))
            .await
            .unwrap();

        let result = service
            .activate_tenant(ActivateTenant::new(tenant_id, "admin"))
            .await;
        assert!(matches!(
            result,
            Err(DomainError::Tenant(
                TenantError::InvalidStateTransition { .. }
            ))
        ));

        let result = service
            .rename_tenant(RenameTenant::new(tenant_id, "Zombie Corp", "admin"))
            .await;
        assert!(matches!(
            result,
            Err(DomainError::Tenant(
                TenantError::InvalidStateTransition { .. }
            ))
        ));

        let result = service
            .update_tenant_config(UpdateTenantConfig::new(
                tenant_id,
                serde_json::json!({"tier": "pro"}),
                "admin",
            ))
            .await;
        assert!(matches!(
            result,
            Err(DomainError::Tenant(
                TenantError::InvalidStateTransition { .. }
            ))
        ));
    }

    #[tokio::test]
    async fn suspend_requires_reason() {
        let service = create_service();

        let cmd = ProvisionTenant::with_slug(slug("acme-corp"), "Acme Corp");
        let tenant_id = cmd.tenant_id;
        service.provision_tenant(cmd).await.unwrap();

        service
            .activate_tenant(ActivateTenant::new(tenant_id, "system"))
            .await
            .unwrap();

        let result = service
            .suspend_tenant(SuspendTenant::new(
                tenant_id,
                "admin",
                "",
                SuspensionCategory::Other,
            ))
            .await;

        assert!(matches!(
            result,
            Err(DomainError::Tenant(TenantError::EmptyReason))
        ));
    }

    #[tokio::test]
    async fn command_against_missing_tenant_fails() {
        let service = create_service();

        let result = service
            .activate_tenant(ActivateTenant::new(AggregateId::new(), "system"))
            .await;

        assert!(matches!(
            result,
            Err(DomainError::Tenant(TenantError::NotProvisioned))
        ));
    }
}

mod snapshots {
    use super::*;
    use domain::SnapshotCapable;
    use domain::Tenant;

    #[tokio::test]
    async fn snapshot_written_at_interval_and_used_on_load() {
        let store = InMemoryEventStore::new();
        let service = TenantService::new(store.clone(), InMemorySlugRegistry::new());

        let cmd = ProvisionTenant::with_slug(slug("acme-corp"), "Acme Corp");
        let tenant_id = cmd.tenant_id;
        service.provision_tenant(cmd).await.unwrap();

        // Drive the version past the snapshot interval with config updates.
        let interval = Tenant::snapshot_interval();
        for i in 1..interval {
            service
                .update_tenant_config(UpdateTenantConfig::new(
                    tenant_id,
                    serde_json::json!({"rev": i}),
                    "admin",
                ))
                .await
                .unwrap();
        }

        let snapshot = store.get_snapshot(tenant_id).await.unwrap();
        let snapshot = snapshot.expect("snapshot should exist at the interval boundary");
        assert_eq!(snapshot.version, Version::new(interval as i64));

        // The loaded state must match the event-folded state exactly.
        let tenant = service.get_tenant(tenant_id).await.unwrap();
        assert_eq!(
            tenant.config(),
            &serde_json::json!({"rev": interval - 1})
        );
        assert_eq!(tenant.version(), Version::new(interval as i64));
    }
}
