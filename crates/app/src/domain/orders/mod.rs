//! Product orders: creation, lifecycle transitions, and loyalty side effects.

pub mod errors;
pub mod models;
pub(crate) mod repositories;
pub mod service;
pub mod status;

pub use errors::OrdersServiceError;
pub use service::{MockOrdersService, OrdersService, PgOrdersService};
pub use status::OrderStatus;
