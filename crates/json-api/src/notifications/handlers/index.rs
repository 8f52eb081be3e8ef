//! Notification Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quadmart_app::domain::notifications::models::Notification;

use crate::{extensions::*, notifications::errors::into_status_error, state::State};

/// Notification Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct NotificationResponse {
    /// Notification UUID
    pub uuid: Uuid,

    /// Short headline
    pub title: String,

    /// Full message body
    pub message: String,

    /// Notification category, e.g. `"order"`
    pub kind: String,

    /// Whether the recipient has read it
    pub is_read: bool,

    /// When the notification was created
    pub created_at: String,
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        NotificationResponse {
            uuid: notification.uuid.into(),
            title: notification.title,
            message: notification.message,
            kind: notification.kind,
            is_read: notification.is_read,
            created_at: notification.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct NotificationsResponse {
    /// The caller's notifications, newest first
    pub notifications: Vec<NotificationResponse>,
}

/// Notification Index Handler
///
/// Returns the caller's notifications, newest first.
#[endpoint(
    tags("notifications"),
    summary = "List Notifications",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<NotificationsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let notifications = state
        .app
        .notifications
        .list_notifications(principal.user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(NotificationsResponse {
        notifications: notifications.into_iter().map(Into::into).collect(),
    }))
}
