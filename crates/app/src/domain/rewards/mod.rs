//! Loyalty rewards catalog and redemptions.

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::RewardsServiceError;
pub use service::{MockRewardsService, PgRewardsService, RewardsService};
