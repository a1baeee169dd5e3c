use uuid::Uuid;

use platform_core::utils::signature::{sign_payload, verify_payload};

use crate::models::{ClaimKind, Identity, InvitationClaims, Role};
use crate::stores::IdentityStore;

use super::error::ServiceError;

/// Invitation token codec.
///
/// Tokens are stateless and carry no expiry: flipping the identity's
/// `invitation_accepted` flag is the sole revocation mechanism. The digest
/// is recomputed over the freshly looked-up identity at verification time,
/// so a role change after issue also invalidates the token.
///
/// Wire format: `invitation:<email>:<digestHex>`.
#[derive(Clone)]
pub struct InvitationTokenService {
    key: String,
}

impl InvitationTokenService {
    pub fn new(key: String) -> Self {
        Self { key }
    }

    /// Deterministic serialization of the claim fields covered by the digest.
    fn claim_payload(user_id: Uuid, role: Role) -> String {
        format!("{}:{}:{}", ClaimKind::Invitation.as_str(), user_id, role.as_str())
    }

    /// Issue a token proving that this specific identity was invited.
    pub fn issue(&self, identity: &Identity) -> Result<String, ServiceError> {
        let digest = sign_payload(
            &self.key,
            &Self::claim_payload(identity.user_id, identity.role),
        )?;

        Ok(format!(
            "{}:{}:{}",
            ClaimKind::Invitation.as_str(),
            identity.email,
            digest
        ))
    }

    /// Verify a token and bind it to the identity it names.
    ///
    /// Fails `InvitationAlreadyAccepted` once the invitation is consumed,
    /// even though the token bytes are unchanged.
    pub async fn verify(
        &self,
        token: &str,
        identities: &dyn IdentityStore,
    ) -> Result<InvitationClaims, ServiceError> {
        let mut parts = token.splitn(3, ':');
        let (kind, email, digest) = match (parts.next(), parts.next(), parts.next()) {
            (Some(kind), Some(email), Some(digest)) => (kind, email, digest),
            _ => return Err(ServiceError::TokenInvalid),
        };

        if kind != ClaimKind::Invitation.as_str() {
            return Err(ServiceError::TokenInvalid);
        }

        // Unknown emails surface as an invalid token, not a 404.
        let identity = identities
            .find_by_email(email)
            .await?
            .ok_or(ServiceError::TokenInvalid)?;

        if identity.invitation_accepted {
            return Err(ServiceError::InvitationAlreadyAccepted);
        }

        let payload = Self::claim_payload(identity.user_id, identity.role);
        if !verify_payload(&self.key, &payload, digest)? {
            tracing::warn!(email = %email, "invitation token digest mismatch");
            return Err(ServiceError::TokenInvalid);
        }

        Ok(InvitationClaims {
            user_id: identity.user_id,
            email: identity.email,
            role: identity.role,
        })
    }
}
