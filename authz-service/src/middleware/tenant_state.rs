//! Tenant lifecycle-state gate.
//!
//! Independently composable from the authorization middleware: a route may
//! gate on tenant state alone, or stack both.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use platform_core::error::AppError;

use crate::models::TenantState;
use crate::services::ServiceError;
use crate::AppState;

/// Tenant id resolved from the route, stored in request extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantScope(pub Uuid);

/// Resolve `/vendors/{id}` into a [`TenantScope`] extension.
///
/// Routes that stack [`super::auth::authz_middleware`] get the scope from it
/// directly; this exists for routes gating on tenant state alone.
pub async fn tenant_scope_middleware(mut req: Request, next: Next) -> Response {
    if let Some(tenant_id) = super::auth::tenant_id_from_path(req.uri().path()) {
        req.extensions_mut().insert(TenantScope(tenant_id));
    }
    next.run(req).await
}

/// Gate a route on the tenant's lifecycle state.
///
/// An empty `allowed` set defaults to `{Normal}`. The tenant scope must
/// already be resolved; a missing scope is a middleware-ordering bug and
/// reports as an internal error, not a request failure. State transitions
/// are driven by billing and usage events elsewhere; this gate only reads.
pub async fn ensure_state(
    State(state): State<AppState>,
    allowed: Vec<TenantState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let scope = req
        .extensions()
        .get::<TenantScope>()
        .copied()
        .ok_or(ServiceError::TenantScopeMissing)?;

    let tenant = state
        .tenants
        .find_by_id(scope.0)
        .await
        .map_err(ServiceError::Internal)?
        .ok_or(ServiceError::TenantNotFound)?;

    let allowed = if allowed.is_empty() {
        vec![TenantState::Normal]
    } else {
        allowed
    };

    if !allowed.contains(&tenant.state) {
        tracing::warn!(
            tenant_id = %tenant.tenant_id,
            state = tenant.state.as_str(),
            "tenant state not allowed for this action"
        );
        return Err(ServiceError::PlanStateRejected.into());
    }

    Ok(next.run(req).await)
}
