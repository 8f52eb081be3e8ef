//! Vendors: shops and service providers, owned by a single profile.

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::VendorsServiceError;
pub use service::{MockVendorsService, PgVendorsService, VendorsService};
