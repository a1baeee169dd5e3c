use platform_core::error::AppError;
use thiserror::Error;

/// Terminal failures of the authorization layer. Nothing here is retried.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Authorization token required")]
    TokenRequired,

    #[error("Authorization token invalid")]
    TokenInvalid,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invitation not accepted")]
    InvitationPending,

    #[error("Tenant invitation not accepted")]
    TenantInvitationPending,

    #[error("Invitation already accepted")]
    InvitationAlreadyAccepted,

    #[error("Insufficient role")]
    InsufficientRole,

    #[error("Insufficient tenant role")]
    InsufficientTenantRole,

    #[error("Plan status does not allow this action")]
    PlanStateRejected,

    #[error("Tenant not found")]
    TenantNotFound,

    #[error("User not found")]
    IdentityNotFound,

    #[error("Tenant scope missing from request")]
    TenantScopeMissing,

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        let message = err.to_string();
        match err {
            ServiceError::TokenRequired
            | ServiceError::TokenInvalid
            | ServiceError::TokenExpired => AppError::Unauthorized(anyhow::anyhow!(message)),

            ServiceError::InvitationPending
            | ServiceError::TenantInvitationPending
            | ServiceError::InsufficientRole
            | ServiceError::InsufficientTenantRole
            | ServiceError::PlanStateRejected => AppError::Forbidden(anyhow::anyhow!(message)),

            ServiceError::InvitationAlreadyAccepted => AppError::Conflict(anyhow::anyhow!(message)),

            ServiceError::TenantNotFound | ServiceError::IdentityNotFound => {
                AppError::NotFound(anyhow::anyhow!(message))
            }

            // Middleware mis-ordering, not a request failure.
            ServiceError::TenantScopeMissing => AppError::InternalError(anyhow::anyhow!(message)),

            ServiceError::Internal(e) => AppError::InternalError(e),
        }
    }
}
