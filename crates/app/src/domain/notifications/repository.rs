//! Notifications Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    notifications::models::{NewNotification, Notification, NotificationUuid},
    profiles::models::ProfileUuid,
};

const CREATE_NOTIFICATION_SQL: &str = include_str!("sql/create_notification.sql");
const LIST_NOTIFICATIONS_SQL: &str = include_str!("sql/list_notifications.sql");
const MARK_READ_SQL: &str = include_str!("sql/mark_read.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgNotificationsRepository;

impl PgNotificationsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_notification(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        notification: &NewNotification,
    ) -> Result<Notification, sqlx::Error> {
        query_as::<Postgres, Notification>(CREATE_NOTIFICATION_SQL)
            .bind(NotificationUuid::new().into_uuid())
            .bind(notification.recipient_uuid.into_uuid())
            .bind(&notification.title)
            .bind(&notification.message)
            .bind(&notification.kind)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_notifications(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        recipient: ProfileUuid,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        query_as::<Postgres, Notification>(LIST_NOTIFICATIONS_SQL)
            .bind(recipient.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Mark a notification read. Scoped to the recipient, so marking someone
    /// else's notification affects zero rows.
    pub(crate) async fn mark_read(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        notification: NotificationUuid,
        recipient: ProfileUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(MARK_READ_SQL)
            .bind(notification.into_uuid())
            .bind(recipient.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Notification {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: NotificationUuid::from_uuid(row.try_get("uuid")?),
            recipient_uuid: ProfileUuid::from_uuid(row.try_get("recipient_uuid")?),
            title: row.try_get("title")?,
            message: row.try_get("message")?,
            kind: row.try_get("kind")?,
            is_read: row.try_get("is_read")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
