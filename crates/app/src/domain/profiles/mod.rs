//! Customer/user profiles: role, wallet balance, and loyalty counters.

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::ProfilesServiceError;
pub use service::{MockProfilesService, PgProfilesService, ProfilesService};
