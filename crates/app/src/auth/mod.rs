//! Authentication against the external identity provider.

pub mod errors;
pub mod identity;
pub mod models;
pub mod service;

pub use errors::AuthServiceError;
pub use identity::{IdentityConfig, IdentityHttpClient, IdentityProvider, MockIdentityProvider};
pub use models::Principal;
pub use service::{AuthService, MockAuthService, PgAuthService};
