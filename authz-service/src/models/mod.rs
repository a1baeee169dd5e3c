pub mod claims;
pub mod identity;
pub mod membership;
pub mod tenant;

pub use claims::{ClaimKind, InvitationClaims, ResetClaims, SessionClaims};
pub use identity::{Identity, Role};
pub use membership::{has_tenant_role, TenantMembership, TenantRole};
pub use tenant::{Tenant, TenantState, TenantType};
