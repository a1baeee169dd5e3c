//! Tenant membership model - per-tenant roles for vendor identities.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role scoped to a single tenant membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TenantRole {
    Admin,
    Analyst,
    Vetter,
}

impl TenantRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TenantRole::Admin => "admin",
            TenantRole::Analyst => "analyst",
            TenantRole::Vetter => "vetter",
        }
    }
}

/// Membership of a vendor identity in a tenant. Unique per (tenant, user).
///
/// `invitation_accepted` can only become true once the owning identity has
/// accepted its own invitation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantMembership {
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub role: TenantRole,
    pub invitation_accepted: bool,
}

impl TenantMembership {
    /// Create a new pending membership.
    pub fn new(tenant_id: Uuid, user_id: Uuid, role: TenantRole) -> Self {
        Self {
            tenant_id,
            user_id,
            role,
            invitation_accepted: false,
        }
    }
}

/// True iff `user_id` holds one of `allowed_roles` in `tenant_id`.
///
/// Also used by handlers outside the authorization path for ad-hoc
/// per-tenant role checks.
pub fn has_tenant_role(
    allowed_roles: &[TenantRole],
    memberships: &[TenantMembership],
    tenant_id: Uuid,
    user_id: Uuid,
) -> bool {
    memberships.iter().any(|m| {
        m.tenant_id == tenant_id && m.user_id == user_id && allowed_roles.contains(&m.role)
    })
}
