//! Account lifecycle flows built on the token codecs.

use std::sync::Arc;

use uuid::Uuid;

use crate::models::Identity;
use crate::stores::{IdentityStore, MembershipStore};
use crate::utils::password;

use super::error::ServiceError;
use super::invitation::InvitationTokenService;
use super::reset::ResetTokenService;

/// Completes invitation-acceptance and password-reset sequences over the
/// injected stores.
#[derive(Clone)]
pub struct AccountService {
    identities: Arc<dyn IdentityStore>,
    memberships: Arc<dyn MembershipStore>,
    invitation_tokens: InvitationTokenService,
    reset_tokens: ResetTokenService,
}

impl AccountService {
    pub fn new(
        identities: Arc<dyn IdentityStore>,
        memberships: Arc<dyn MembershipStore>,
        invitation_tokens: InvitationTokenService,
        reset_tokens: ResetTokenService,
    ) -> Self {
        Self {
            identities,
            memberships,
            invitation_tokens,
            reset_tokens,
        }
    }

    /// Complete a first-login invitation.
    ///
    /// Sets the password, flips the identity's accepted flag, and only then
    /// accepts the identity's pending memberships: a membership can never be
    /// accepted before its owning identity.
    pub async fn accept_invitation(
        &self,
        token: &str,
        password: &str,
    ) -> Result<Identity, ServiceError> {
        let claims = self
            .invitation_tokens
            .verify(token, self.identities.as_ref())
            .await?;

        let hash = password::hash_password(password)?;
        self.identities
            .set_password_hash(claims.user_id, hash)
            .await?;
        self.identities
            .mark_invitation_accepted(claims.user_id)
            .await?;

        for membership in self.memberships.list_by_user(claims.user_id).await? {
            if !membership.invitation_accepted {
                self.memberships
                    .mark_invitation_accepted(membership.tenant_id, claims.user_id)
                    .await?;
            }
        }

        tracing::info!(user_id = %claims.user_id, "invitation accepted");

        self.identities
            .find_by_id(claims.user_id)
            .await?
            .ok_or(ServiceError::IdentityNotFound)
    }

    /// Accept a later tenant invitation for an already-active identity.
    pub async fn accept_tenant_invitation(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), ServiceError> {
        let identity = self
            .identities
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::IdentityNotFound)?;

        if !identity.invitation_accepted {
            return Err(ServiceError::InvitationPending);
        }

        self.memberships
            .find(tenant_id, user_id)
            .await?
            .ok_or(ServiceError::TenantNotFound)?;

        self.memberships
            .mark_invitation_accepted(tenant_id, user_id)
            .await?;

        tracing::info!(user_id = %user_id, tenant_id = %tenant_id, "tenant invitation accepted");
        Ok(())
    }

    /// Complete a password reset against a verified reset token.
    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<(), ServiceError> {
        let (_, identity) = self
            .reset_tokens
            .verify(token, self.identities.as_ref())
            .await?;

        let hash = password::hash_password(new_password)?;
        self.identities
            .set_password_hash(identity.user_id, hash)
            .await?;

        tracing::info!(user_id = %identity.user_id, "password reset completed");
        Ok(())
    }

    /// Check a login password against the stored hash.
    pub fn check_password(identity: &Identity, candidate: &str) -> Result<bool, ServiceError> {
        match &identity.password_hash {
            Some(hash) => Ok(password::verify_password(candidate, hash)?),
            None => Ok(false),
        }
    }
}
