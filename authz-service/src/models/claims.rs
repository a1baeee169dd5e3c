//! Ephemeral claims produced by token verification. Never persisted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Role;

/// Kind of claim a token asserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimKind {
    Auth,
    Invitation,
}

impl ClaimKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimKind::Auth => "auth",
            ClaimKind::Invitation => "invitation",
        }
    }
}

/// Verified session credential: subject, role snapshot and the
/// externally-managed expiry (epoch seconds).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub user_id: Uuid,
    pub role: Role,
    pub expiry: i64,
}

impl SessionClaims {
    pub fn kind(&self) -> ClaimKind {
        ClaimKind::Auth
    }
}

/// Verified invitation credential. Carries no expiry: the invitation's
/// accepted flag is the sole revocation mechanism.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvitationClaims {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
}

impl InvitationClaims {
    pub fn kind(&self) -> ClaimKind {
        ClaimKind::Invitation
    }
}

/// Verified reset-password credential. Expiry is epoch milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetClaims {
    pub email: String,
    pub expiry_millis: i64,
}
