//! Services layer: token codecs, session verification and account flows.

mod account;
pub mod error;
mod invitation;
mod reset;
mod session;

pub use account::AccountService;
pub use error::ServiceError;
pub use invitation::InvitationTokenService;
pub use reset::ResetTokenService;
pub use session::{JwtSessionVerifier, SessionTokenService};
