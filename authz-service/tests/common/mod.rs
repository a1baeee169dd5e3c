//! Test helpers: in-memory stores plus a preconfigured AppState.

#![allow(dead_code)]

use std::sync::Arc;

use authz_service::{
    config::{AuthzConfig, Environment, SecretConfig, SessionConfig},
    models::{Identity, Role, Tenant, TenantMembership, TenantRole, TenantState, TenantType},
    services::JwtSessionVerifier,
    stores::MemoryDirectory,
    AppState,
};
use uuid::Uuid;

pub const TEST_SESSION_SECRET: &str = "test-session-secret";
pub const TEST_INVITATION_KEY: &str = "test-invitation-key";
pub const TEST_RESET_KEY: &str = "test-reset-key";

pub fn test_config() -> AuthzConfig {
    AuthzConfig {
        common: platform_core::config::Config {
            port: 8080,
            log_level: "error".to_string(),
        },
        environment: Environment::Dev,
        service_name: "authz-service-test".to_string(),
        log_level: "error".to_string(),
        session: SessionConfig {
            secret: TEST_SESSION_SECRET.to_string(),
            expiry_minutes: 15,
        },
        secrets: SecretConfig {
            invitation_key: TEST_INVITATION_KEY.to_string(),
            reset_key: TEST_RESET_KEY.to_string(),
            reset_token_ttl_minutes: 30,
        },
    }
}

pub struct TestEnv {
    pub state: AppState,
    pub directory: MemoryDirectory,
    pub jwt: JwtSessionVerifier,
}

pub fn test_env() -> TestEnv {
    let config = test_config();
    let directory = MemoryDirectory::new();
    let jwt = JwtSessionVerifier::new(&config.session);

    let state = AppState::new(
        config,
        Arc::new(directory.clone()),
        Arc::new(directory.clone()),
        Arc::new(directory.clone()),
    );

    TestEnv {
        state,
        directory,
        jwt,
    }
}

impl TestEnv {
    /// Seed an identity and return it.
    pub async fn seed_identity(&self, email: &str, role: Role, accepted: bool) -> Identity {
        let mut identity = Identity::new(email.to_string(), role);
        identity.invitation_accepted = accepted;
        self.directory.insert_identity(identity.clone()).await;
        identity
    }

    /// Seed a tenant in a given lifecycle state and return it.
    pub async fn seed_tenant(&self, name: &str, state: TenantState) -> Tenant {
        let mut tenant = Tenant::new(name.to_string(), TenantType::External);
        tenant.state = state;
        self.directory.insert_tenant(tenant.clone()).await;
        tenant
    }

    /// Seed a membership and return it.
    pub async fn seed_membership(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
        role: TenantRole,
        accepted: bool,
    ) -> TenantMembership {
        let mut membership = TenantMembership::new(tenant_id, user_id, role);
        membership.invitation_accepted = accepted;
        self.directory.insert_membership(membership.clone()).await;
        membership
    }

    /// Mint a session token for an identity.
    pub fn session_token(&self, identity: &Identity) -> String {
        self.jwt
            .issue(identity.user_id, identity.role)
            .expect("failed to issue session token")
    }
}
