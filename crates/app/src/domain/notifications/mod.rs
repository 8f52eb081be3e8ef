//! In-app notifications and best-effort push delivery.

pub mod errors;
pub mod models;
pub mod push;
pub(crate) mod repository;
pub mod service;

pub use errors::NotificationsServiceError;
pub use push::{MockPushGateway, PushGateway, PushMessage, WebPushDispatcher};
pub use service::{MockNotificationsService, NotificationsService, PgNotificationsService};
