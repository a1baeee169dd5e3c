//! Tenant model - vendor organizations with a billing-driven lifecycle state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tenant type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TenantType {
    Internal,
    External,
}

impl TenantType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TenantType::Internal => "internal",
            TenantType::External => "external",
        }
    }

    /// State a tenant of this type starts in.
    pub fn initial_state(&self) -> TenantState {
        match self {
            TenantType::Internal => TenantState::Normal,
            TenantType::External => TenantState::SubscriptionRequired,
        }
    }

    /// States a tenant of this type may occupy. Internal tenants never enter
    /// the subscription states.
    pub fn allows_state(&self, state: TenantState) -> bool {
        match self {
            TenantType::Internal => {
                matches!(state, TenantState::Normal | TenantState::LimitExceeded)
            }
            TenantType::External => true,
        }
    }
}

/// Tenant lifecycle state codes.
///
/// Transitions are driven by billing and usage events outside this crate;
/// the authorization layer only reads state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenantState {
    Normal,
    SubscriptionRequired,
    SubscriptionRenewFailed,
    LimitExceeded,
}

impl TenantState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TenantState::Normal => "normal",
            TenantState::SubscriptionRequired => "subscription_required",
            TenantState::SubscriptionRenewFailed => "subscription_renew_failed",
            TenantState::LimitExceeded => "limit_exceeded",
        }
    }
}

/// Tenant entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    pub tenant_id: Uuid,
    pub name: String,
    pub tenant_type: TenantType,
    pub state: TenantState,
    pub created_utc: DateTime<Utc>,
}

impl Tenant {
    /// Create a new tenant in the initial state for its type.
    pub fn new(name: String, tenant_type: TenantType) -> Self {
        Self {
            tenant_id: Uuid::new_v4(),
            name,
            tenant_type,
            state: tenant_type.initial_state(),
            created_utc: Utc::now(),
        }
    }
}
