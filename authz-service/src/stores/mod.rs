//! Collaborator store seams.
//!
//! Implementations are injected into [`crate::AppState`]; nothing in this
//! crate owns a connection pool or a process-wide singleton. Lookups that
//! are expected to sometimes miss return `Option`; errors are reserved for
//! infrastructure faults.

mod memory;

pub use memory::MemoryDirectory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Identity, Tenant, TenantMembership};

#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<Identity>, anyhow::Error>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, anyhow::Error>;

    async fn mark_invitation_accepted(&self, user_id: Uuid) -> Result<(), anyhow::Error>;

    async fn set_password_hash(&self, user_id: Uuid, hash: String) -> Result<(), anyhow::Error>;
}

#[async_trait]
pub trait TenantStore: Send + Sync {
    async fn find_by_id(&self, tenant_id: Uuid) -> Result<Option<Tenant>, anyhow::Error>;
}

#[async_trait]
pub trait MembershipStore: Send + Sync {
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<TenantMembership>, anyhow::Error>;

    async fn find(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<TenantMembership>, anyhow::Error>;

    async fn mark_invitation_accepted(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), anyhow::Error>;
}
