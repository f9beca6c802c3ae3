//! Authenticated caller identity.

use common::TenantSlug;
use serde::{Deserialize, Serialize};

/// The kind of authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrincipalKind {
    /// A human end user.
    User,
    /// A machine-to-machine service identity.
    Service,
}

/// An authenticated caller, as established by the upstream gateway.
///
/// The principal is an immutable value: it is constructed once per request
/// from already-validated identity claims and consumed read-only for
/// authorization checks. No credential validation happens here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    tenant: Option<TenantSlug>,
    subject: String,
    roles: Vec<String>,
    kind: PrincipalKind,
}

impl Principal {
    /// Creates a user principal scoped to a tenant.
    pub fn user(
        tenant: TenantSlug,
        subject: impl Into<String>,
        roles: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            tenant: Some(tenant),
            subject: subject.into(),
            roles: roles.into_iter().collect(),
            kind: PrincipalKind::User,
        }
    }

    /// Creates a service principal, optionally scoped to a tenant.
    ///
    /// System-level services carry no tenant.
    pub fn service(
        tenant: Option<TenantSlug>,
        subject: impl Into<String>,
        roles: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            tenant,
            subject: subject.into(),
            roles: roles.into_iter().collect(),
            kind: PrincipalKind::Service,
        }
    }

    /// The tenant this principal is scoped to, if any.
    pub fn tenant(&self) -> Option<&TenantSlug> {
        self.tenant.as_ref()
    }

    /// The subject identifier (user id or service name).
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// The roles granted to this principal.
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// Returns true if the principal carries the given role.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Returns true for machine-to-machine principals.
    pub fn is_service(&self) -> bool {
        self.kind == PrincipalKind::Service
    }

    /// The principal kind.
    pub fn kind(&self) -> PrincipalKind {
        self.kind
    }
}
