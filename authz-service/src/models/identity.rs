//! Identity model - platform-wide accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Global role of an identity.
///
/// Admin identities operate at platform scope and hold no tenant
/// memberships; vendor identities may belong to any number of tenants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Vendor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Vendor => "vendor",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "vendor" => Ok(Role::Vendor),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// Identity entity.
///
/// Created administratively or through a tenant invite; `invitation_accepted`
/// flips exactly once, on first-login acceptance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
    pub invitation_accepted: bool,
    #[serde(default, skip_serializing)]
    pub password_hash: Option<String>,
    pub created_utc: DateTime<Utc>,
}

impl Identity {
    /// Create a new identity with a pending invitation and no password.
    pub fn new(email: String, role: Role) -> Self {
        Self {
            user_id: Uuid::new_v4(),
            email,
            role,
            invitation_accepted: false,
            password_hash: None,
            created_utc: Utc::now(),
        }
    }
}
