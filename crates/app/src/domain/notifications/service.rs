//! Notifications service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        notifications::{
            errors::NotificationsServiceError,
            models::{Notification, NotificationUuid},
            repository::PgNotificationsRepository,
        },
        profiles::models::ProfileUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgNotificationsService {
    db: Db,
    repository: PgNotificationsRepository,
}

impl PgNotificationsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgNotificationsRepository::new(),
        }
    }
}

#[async_trait]
impl NotificationsService for PgNotificationsService {
    async fn list_notifications(
        &self,
        recipient: ProfileUuid,
    ) -> Result<Vec<Notification>, NotificationsServiceError> {
        let mut tx = self.db.begin().await?;

        let notifications = self.repository.list_notifications(&mut tx, recipient).await?;

        tx.commit().await?;

        Ok(notifications)
    }

    async fn mark_read(
        &self,
        recipient: ProfileUuid,
        notification: NotificationUuid,
    ) -> Result<(), NotificationsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .mark_read(&mut tx, notification, recipient)
            .await?;

        if rows_affected == 0 {
            return Err(NotificationsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait NotificationsService: Send + Sync {
    /// Retrieve the recipient's notifications, newest first.
    async fn list_notifications(
        &self,
        recipient: ProfileUuid,
    ) -> Result<Vec<Notification>, NotificationsServiceError>;

    /// Mark one of the recipient's notifications as read.
    async fn mark_read(
        &self,
        recipient: ProfileUuid,
        notification: NotificationUuid,
    ) -> Result<(), NotificationsServiceError>;
}
