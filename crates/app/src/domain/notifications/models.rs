//! Notification Models

use jiff::Timestamp;

use crate::{domain::profiles::models::ProfileUuid, uuids::TypedUuid};

/// Notification UUID
pub type NotificationUuid = TypedUuid<Notification>;

/// Notification Model
#[derive(Debug, Clone)]
pub struct Notification {
    pub uuid: NotificationUuid,
    pub recipient_uuid: ProfileUuid,
    pub title: String,
    pub message: String,
    pub kind: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}

/// New Notification Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub recipient_uuid: ProfileUuid,
    pub title: String,
    pub message: String,
    pub kind: String,
}
