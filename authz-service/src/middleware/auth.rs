//! Authorization middleware: the layered decision pipeline.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use platform_core::error::AppError;

use crate::models::{has_tenant_role, Identity, Role, TenantMembership, TenantRole};
use crate::services::ServiceError;
use crate::AppState;

use super::tenant_state::TenantScope;

/// Outcome of a successful authorization: the verified identity plus every
/// tenant membership it holds, attached to the request for handlers.
#[derive(Debug, Clone)]
pub struct AuthorizedContext {
    pub identity: Identity,
    pub memberships: Vec<TenantMembership>,
}

/// Route-level authorization policy.
///
/// Empty role sets mean "any authenticated identity passes". Built through
/// [`AuthzOptions::builder`], which rejects contradictory policies at
/// construction rather than per request.
#[derive(Debug, Clone, Default)]
pub struct AuthzOptions {
    allowed_roles: Vec<Role>,
    allowed_tenant_roles: Vec<TenantRole>,
    allow_pending_tenant_invitation: bool,
}

/// Policy construction errors. These are programmer errors, not request
/// failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    /// Tenant-role checks only apply to vendor identities; requiring a
    /// tenant role while excluding the vendor role can never pass.
    TenantRolesWithoutVendor,
}

impl std::fmt::Display for OptionsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionsError::TenantRolesWithoutVendor => write!(
                f,
                "allowed_tenant_roles configured while allowed_roles excludes the vendor role"
            ),
        }
    }
}

impl std::error::Error for OptionsError {}

impl AuthzOptions {
    pub fn builder() -> AuthzOptionsBuilder {
        AuthzOptionsBuilder::default()
    }
}

#[derive(Debug, Default)]
pub struct AuthzOptionsBuilder {
    allowed_roles: Vec<Role>,
    allowed_tenant_roles: Vec<TenantRole>,
    allow_pending_tenant_invitation: bool,
}

impl AuthzOptionsBuilder {
    pub fn allow_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.allowed_roles.extend(roles);
        self
    }

    pub fn allow_tenant_roles(mut self, roles: impl IntoIterator<Item = TenantRole>) -> Self {
        self.allowed_tenant_roles.extend(roles);
        self
    }

    /// Let callers whose tenant invitation is still pending through, for the
    /// routes that accept those invitations.
    pub fn allow_pending_tenant_invitation(mut self) -> Self {
        self.allow_pending_tenant_invitation = true;
        self
    }

    pub fn build(self) -> Result<AuthzOptions, OptionsError> {
        if !self.allowed_tenant_roles.is_empty()
            && !self.allowed_roles.is_empty()
            && !self.allowed_roles.contains(&Role::Vendor)
        {
            return Err(OptionsError::TenantRolesWithoutVendor);
        }

        Ok(AuthzOptions {
            allowed_roles: self.allowed_roles,
            allowed_tenant_roles: self.allowed_tenant_roles,
            allow_pending_tenant_invitation: self.allow_pending_tenant_invitation,
        })
    }
}

/// Evaluate the authorization pipeline for one request.
///
/// Checks run strictly in order and the first failure is terminal:
/// credential verification, identity lookup, global invitation gate, tenant
/// invitation gate, global role gate, tenant role gate.
pub async fn authorize(
    state: &AppState,
    bearer: Option<&str>,
    tenant_id: Option<Uuid>,
    options: &AuthzOptions,
) -> Result<AuthorizedContext, ServiceError> {
    let token = bearer.ok_or(ServiceError::TokenRequired)?;
    let claims = state.sessions.verify(token)?;

    // A deleted account can still hold a syntactically valid token.
    let identity = state
        .identities
        .find_by_id(claims.user_id)
        .await?
        .ok_or(ServiceError::TokenInvalid)?;

    if !identity.invitation_accepted {
        return Err(ServiceError::InvitationPending);
    }

    if let Some(tenant_id) = tenant_id {
        if identity.role == Role::Vendor && !options.allow_pending_tenant_invitation {
            if let Some(membership) = state.memberships.find(tenant_id, identity.user_id).await? {
                if !membership.invitation_accepted {
                    tracing::warn!(
                        user_id = %identity.user_id,
                        tenant_id = %tenant_id,
                        "tenant invitation still pending"
                    );
                    return Err(ServiceError::TenantInvitationPending);
                }
            }
        }
    }

    if !options.allowed_roles.is_empty() && !options.allowed_roles.contains(&identity.role) {
        tracing::warn!(
            user_id = %identity.user_id,
            role = identity.role.as_str(),
            "global role not allowed"
        );
        return Err(ServiceError::InsufficientRole);
    }

    let mut memberships = Vec::new();
    if identity.role == Role::Vendor {
        // Handlers downstream need the full membership list even when no
        // tenant-role check is configured.
        memberships = state.memberships.list_by_user(identity.user_id).await?;

        if !options.allowed_tenant_roles.is_empty() {
            let tenant_id = tenant_id.ok_or(ServiceError::TenantScopeMissing)?;
            if !has_tenant_role(
                &options.allowed_tenant_roles,
                &memberships,
                tenant_id,
                identity.user_id,
            ) {
                tracing::warn!(
                    user_id = %identity.user_id,
                    tenant_id = %tenant_id,
                    "tenant role not allowed"
                );
                return Err(ServiceError::InsufficientTenantRole);
            }
        }
    }

    Ok(AuthorizedContext {
        identity,
        memberships,
    })
}

/// Extract the tenant id from `/vendors/{id}` style paths.
pub(crate) fn tenant_id_from_path(path: &str) -> Option<Uuid> {
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    while let Some(segment) = segments.next() {
        if segment == "vendors" {
            return segments.next().and_then(|id| id.parse().ok());
        }
    }
    None
}

/// Middleware enforcing an [`AuthzOptions`] policy.
///
/// Apply via a closure that captures the policy:
/// ```ignore
/// from_fn_with_state(state.clone(), move |s, req, next| {
///     authz_middleware(s, options.clone(), req, next)
/// })
/// ```
pub async fn authz_middleware(
    State(state): State<AppState>,
    options: AuthzOptions,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let bearer = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));
    let tenant_id = tenant_id_from_path(req.uri().path());

    let context = authorize(&state, bearer, tenant_id, &options).await?;

    if let Some(tenant_id) = tenant_id {
        req.extensions_mut().insert(TenantScope(tenant_id));
    }
    req.extensions_mut().insert(context);

    Ok(next.run(req).await)
}

/// Extractor for the authorization outcome in handlers.
pub struct AuthContext(pub AuthorizedContext);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthorizedContext>()
            .cloned()
            .map(AuthContext)
            .ok_or_else(|| {
                AppError::InternalError(anyhow::anyhow!(
                    "Authorized context missing from request extensions"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenant_roles_require_vendor_capable_policy() {
        let err = AuthzOptions::builder()
            .allow_roles([Role::Admin])
            .allow_tenant_roles([TenantRole::Admin])
            .build()
            .unwrap_err();
        assert_eq!(err, OptionsError::TenantRolesWithoutVendor);
    }

    #[test]
    fn test_tenant_roles_with_any_global_role() {
        // An empty allowed-roles set admits vendors, so tenant roles are fine.
        assert!(AuthzOptions::builder()
            .allow_tenant_roles([TenantRole::Analyst])
            .build()
            .is_ok());
    }

    #[test]
    fn test_tenant_id_from_path() {
        let id = Uuid::new_v4();
        assert_eq!(
            tenant_id_from_path(&format!("/vendors/{}/products", id)),
            Some(id)
        );
        assert_eq!(tenant_id_from_path(&format!("/api/vendors/{}", id)), Some(id));
        assert_eq!(tenant_id_from_path("/vendors/not-a-uuid/products"), None);
        assert_eq!(tenant_id_from_path("/customers/123"), None);
        assert_eq!(tenant_id_from_path("/vendors"), None);
    }
}
