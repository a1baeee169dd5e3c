//! platform-core: Shared infrastructure for vendauth services.
pub mod config;
pub mod error;
pub mod observability;
pub mod utils;

pub use async_trait;
pub use axum;
pub use serde;
pub use serde_json;
pub use tokio;
pub use tower;
pub use tracing;
