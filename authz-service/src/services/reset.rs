use chrono::{Duration, Utc};

use platform_core::utils::signature::{sign_payload, verify_payload};

use crate::models::{Identity, ResetClaims};
use crate::stores::IdentityStore;

use super::error::ServiceError;

/// Reset-password token codec.
///
/// Self-contained, time-limited proof of email ownership for unauthenticated
/// password reset. Wire format: `<email>:<expiryEpochMillis>:<hmacHex>`.
#[derive(Clone)]
pub struct ResetTokenService {
    key: String,
    ttl_minutes: i64,
}

impl ResetTokenService {
    pub fn new(key: String, ttl_minutes: i64) -> Self {
        Self { key, ttl_minutes }
    }

    fn claim_payload(email: &str, expiry_millis: i64) -> String {
        format!("{}:{}", email, expiry_millis)
    }

    /// Issue a token expiring after the configured TTL.
    pub fn issue(&self, identity: &Identity) -> Result<String, ServiceError> {
        let expiry = (Utc::now() + Duration::minutes(self.ttl_minutes)).timestamp_millis();
        let signature = sign_payload(&self.key, &Self::claim_payload(&identity.email, expiry))?;

        Ok(format!("{}:{}:{}", identity.email, expiry, signature))
    }

    /// Verify a token and resolve the identity owning the embedded email.
    pub async fn verify(
        &self,
        token: &str,
        identities: &dyn IdentityStore,
    ) -> Result<(ResetClaims, Identity), ServiceError> {
        let parts: Vec<&str> = token.split(':').collect();
        if parts.len() != 3 {
            return Err(ServiceError::TokenInvalid);
        }
        let (email, expiry_str, signature) = (parts[0], parts[1], parts[2]);

        let expiry_millis: i64 = expiry_str.parse().map_err(|_| ServiceError::TokenInvalid)?;

        // Strictly `now < expiry`: equality counts as expired.
        if Utc::now().timestamp_millis() >= expiry_millis {
            return Err(ServiceError::TokenExpired);
        }

        if !verify_payload(
            &self.key,
            &Self::claim_payload(email, expiry_millis),
            signature,
        )? {
            tracing::warn!(email = %email, "reset token signature mismatch");
            return Err(ServiceError::TokenInvalid);
        }

        let identity = identities
            .find_by_email(email)
            .await?
            .ok_or(ServiceError::TokenInvalid)?;

        Ok((
            ResetClaims {
                email: email.to_string(),
                expiry_millis,
            },
            identity,
        ))
    }
}
