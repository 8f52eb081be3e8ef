//! Service requests: quote-based bookings against service vendors.

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;
pub mod status;

pub use errors::ServiceRequestsServiceError;
pub use service::{MockServiceRequestsService, PgServiceRequestsService, ServiceRequestsService};
pub use status::ServiceRequestStatus;
