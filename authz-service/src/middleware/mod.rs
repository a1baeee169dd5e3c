pub mod auth;
pub mod tenant_state;

pub use auth::{
    authorize, authz_middleware, AuthContext, AuthorizedContext, AuthzOptions, OptionsError,
};
pub use tenant_state::{ensure_state, tenant_scope_middleware, TenantScope};
