//! authz-service: authorization and credential-token subsystem for the
//! multi-tenant vendor platform.
//!
//! Turns an inbound bearer credential into a verified identity, decides
//! whether that identity may act against a specific tenant, and issues and
//! validates the three bearer-token schemes (session, invitation, password
//! reset). Persistence, routing and delivery concerns stay behind the seams
//! in [`stores`].

pub mod config;
pub mod middleware;
pub mod models;
pub mod services;
pub mod stores;
pub mod utils;

use std::sync::Arc;

use crate::config::AuthzConfig;
use crate::services::{
    AccountService, InvitationTokenService, JwtSessionVerifier, ResetTokenService,
    SessionTokenService,
};
use crate::stores::{IdentityStore, MembershipStore, TenantStore};

/// Shared state handed to middleware and handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: AuthzConfig,
    pub identities: Arc<dyn IdentityStore>,
    pub tenants: Arc<dyn TenantStore>,
    pub memberships: Arc<dyn MembershipStore>,
    pub sessions: Arc<dyn SessionTokenService>,
    pub invitation_tokens: InvitationTokenService,
    pub reset_tokens: ResetTokenService,
}

impl AppState {
    /// Wire the default token services from configuration over injected
    /// stores.
    pub fn new(
        config: AuthzConfig,
        identities: Arc<dyn IdentityStore>,
        tenants: Arc<dyn TenantStore>,
        memberships: Arc<dyn MembershipStore>,
    ) -> Self {
        let sessions: Arc<dyn SessionTokenService> =
            Arc::new(JwtSessionVerifier::new(&config.session));
        let invitation_tokens = InvitationTokenService::new(config.secrets.invitation_key.clone());
        let reset_tokens = ResetTokenService::new(
            config.secrets.reset_key.clone(),
            config.secrets.reset_token_ttl_minutes,
        );

        Self {
            config,
            identities,
            tenants,
            memberships,
            sessions,
            invitation_tokens,
            reset_tokens,
        }
    }

    /// Account flows built over this state's stores and codecs.
    pub fn account_service(&self) -> AccountService {
        AccountService::new(
            self.identities.clone(),
            self.memberships.clone(),
            self.invitation_tokens.clone(),
            self.reset_tokens.clone(),
        )
    }
}
