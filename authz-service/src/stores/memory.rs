//! In-process store backing all three seams. Used by tests and local dev.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Identity, Tenant, TenantMembership};

use super::{IdentityStore, MembershipStore, TenantStore};

/// Shared in-memory directory of identities, tenants and memberships.
#[derive(Clone, Default)]
pub struct MemoryDirectory {
    identities: Arc<RwLock<HashMap<Uuid, Identity>>>,
    tenants: Arc<RwLock<HashMap<Uuid, Tenant>>>,
    memberships: Arc<RwLock<Vec<TenantMembership>>>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_identity(&self, identity: Identity) {
        self.identities
            .write()
            .await
            .insert(identity.user_id, identity);
    }

    pub async fn remove_identity(&self, user_id: Uuid) {
        self.identities.write().await.remove(&user_id);
    }

    pub async fn insert_tenant(&self, tenant: Tenant) {
        self.tenants.write().await.insert(tenant.tenant_id, tenant);
    }

    pub async fn insert_membership(&self, membership: TenantMembership) {
        let mut memberships = self.memberships.write().await;
        memberships
            .retain(|m| !(m.tenant_id == membership.tenant_id && m.user_id == membership.user_id));
        memberships.push(membership);
    }
}

#[async_trait]
impl IdentityStore for MemoryDirectory {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<Identity>, anyhow::Error> {
        Ok(self.identities.read().await.get(&user_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, anyhow::Error> {
        Ok(self
            .identities
            .read()
            .await
            .values()
            .find(|i| i.email == email)
            .cloned())
    }

    async fn mark_invitation_accepted(&self, user_id: Uuid) -> Result<(), anyhow::Error> {
        let mut identities = self.identities.write().await;
        let identity = identities
            .get_mut(&user_id)
            .ok_or_else(|| anyhow::anyhow!("identity {} not found", user_id))?;
        identity.invitation_accepted = true;
        Ok(())
    }

    async fn set_password_hash(&self, user_id: Uuid, hash: String) -> Result<(), anyhow::Error> {
        let mut identities = self.identities.write().await;
        let identity = identities
            .get_mut(&user_id)
            .ok_or_else(|| anyhow::anyhow!("identity {} not found", user_id))?;
        identity.password_hash = Some(hash);
        Ok(())
    }
}

#[async_trait]
impl TenantStore for MemoryDirectory {
    async fn find_by_id(&self, tenant_id: Uuid) -> Result<Option<Tenant>, anyhow::Error> {
        Ok(self.tenants.read().await.get(&tenant_id).cloned())
    }
}

#[async_trait]
impl MembershipStore for MemoryDirectory {
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<TenantMembership>, anyhow::Error> {
        Ok(self
            .memberships
            .read()
            .await
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<TenantMembership>, anyhow::Error> {
        Ok(self
            .memberships
            .read()
            .await
            .iter()
            .find(|m| m.tenant_id == tenant_id && m.user_id == user_id)
            .cloned())
    }

    async fn mark_invitation_accepted(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), anyhow::Error> {
        let mut memberships = self.memberships.write().await;
        let membership = memberships
            .iter_mut()
            .find(|m| m.tenant_id == tenant_id && m.user_id == user_id)
            .ok_or_else(|| {
                anyhow::anyhow!("membership ({}, {}) not found", tenant_id, user_id)
            })?;
        membership.invitation_accepted = true;
        Ok(())
    }
}
