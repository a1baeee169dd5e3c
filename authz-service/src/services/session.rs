use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::models::{Role, SessionClaims};

use super::error::ServiceError;

/// Verification seam for session bearer credentials.
///
/// Issuance lives with the login surface; the authorization layer only
/// depends on this contract. Verification is a pure check, no I/O.
pub trait SessionTokenService: Send + Sync {
    fn verify(&self, token: &str) -> Result<SessionClaims, ServiceError>;
}

/// Wire-level JWT claims for session tokens.
#[derive(Debug, Serialize, Deserialize)]
struct SessionTokenClaims {
    /// Subject (user ID)
    sub: String,
    /// Global role snapshot at issuance
    role: Role,
    /// Expiration time (Unix timestamp)
    exp: i64,
    /// Issued at (Unix timestamp)
    iat: i64,
}

/// Default [`SessionTokenService`] backed by HS256 JWTs.
#[derive(Clone)]
pub struct JwtSessionVerifier {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_minutes: i64,
}

impl JwtSessionVerifier {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            expiry_minutes: config.expiry_minutes,
        }
    }

    /// Mint a session token. Exposed for login flows and tests.
    pub fn issue(&self, user_id: Uuid, role: Role) -> Result<String, ServiceError> {
        let now = Utc::now();
        let exp = now + Duration::minutes(self.expiry_minutes);

        let claims = SessionTokenClaims {
            sub: user_id.to_string(),
            role,
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            ServiceError::Internal(anyhow::anyhow!("Failed to encode session token: {}", e))
        })
    }
}

impl SessionTokenService for JwtSessionVerifier {
    fn verify(&self, token: &str) -> Result<SessionClaims, ServiceError> {
        let data = decode::<SessionTokenClaims>(
            token,
            &self.decoding_key,
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|_| ServiceError::TokenInvalid)?;

        let user_id: Uuid = data
            .claims
            .sub
            .parse()
            .map_err(|_| ServiceError::TokenInvalid)?;

        Ok(SessionClaims {
            user_id,
            role: data.claims.role,
            expiry: data.claims.exp,
        })
    }
}
