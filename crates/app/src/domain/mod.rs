//! Quadmart Domain Concerns

pub mod applications;
pub mod fulfillment;
pub mod loyalty;
pub mod notifications;
pub mod orders;
pub mod products;
pub mod profiles;
pub mod rewards;
pub mod service_requests;
pub mod vendors;
pub mod wallet;
