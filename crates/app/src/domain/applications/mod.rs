//! Vendor applications: apply once, reviewed by an admin.

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::ApplicationsServiceError;
pub use models::ApplicationStatus;
pub use service::{ApplicationsService, MockApplicationsService, PgApplicationsService};
