//! Push notification transport.
//!
//! Delivery is best effort: callers hand the send off to a detached task via
//! [`dispatch`], and a failure is logged without ever reaching the operation
//! that triggered it.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use sqlx::PgPool;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::profiles::models::ProfileUuid;

const LIST_PUSH_ENDPOINTS_SQL: &str = include_str!("sql/list_push_endpoints.sql");
const DELETE_PUSH_ENDPOINT_SQL: &str = include_str!("sql/delete_push_endpoint.sql");

/// Payload delivered to each registered device endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct PushMessage {
    pub title: String,
    pub body: String,
    pub url: Option<String>,
    pub tag: Option<String>,
    pub data: serde_json::Value,
}

#[derive(Debug, Error)]
pub enum PushError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}

#[automock]
#[async_trait]
pub trait PushGateway: Send + Sync {
    /// Attempt delivery to every endpoint registered for `user`.
    async fn push_to_user(&self, user: ProfileUuid, message: &PushMessage)
    -> Result<(), PushError>;
}

/// Sends push payloads to registered endpoints, pruning endpoints the
/// transport reports as gone.
#[derive(Debug, Clone)]
pub struct WebPushDispatcher {
    pool: PgPool,
    http: Client,
}

impl WebPushDispatcher {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl PushGateway for WebPushDispatcher {
    async fn push_to_user(
        &self,
        user: ProfileUuid,
        message: &PushMessage,
    ) -> Result<(), PushError> {
        let endpoints: Vec<(Uuid, String)> = sqlx::query_as(LIST_PUSH_ENDPOINTS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&self.pool)
            .await?;

        for (endpoint_uuid, endpoint) in endpoints {
            match self.http.post(&endpoint).json(message).send().await {
                Ok(response)
                    if matches!(
                        response.status(),
                        StatusCode::NOT_FOUND | StatusCode::GONE
                    ) =>
                {
                    // The subscription is dead; unsubscribe instead of retrying.
                    debug!("pruning expired push endpoint {endpoint_uuid}");

                    sqlx::query(DELETE_PUSH_ENDPOINT_SQL)
                        .bind(endpoint_uuid)
                        .execute(&self.pool)
                        .await?;
                }
                Ok(response) if !response.status().is_success() => {
                    warn!(
                        "push delivery to endpoint {endpoint_uuid} failed with status {}",
                        response.status()
                    );
                }
                Ok(_response) => {}
                Err(error) => {
                    warn!("push delivery to endpoint {endpoint_uuid} failed: {error}");
                }
            }
        }

        Ok(())
    }
}

/// Fire-and-forget a push send on a detached task.
///
/// Failures are logged and never propagate to the triggering operation.
pub fn dispatch(gateway: Arc<dyn PushGateway>, user: ProfileUuid, message: PushMessage) {
    tokio::spawn(async move {
        if let Err(error) = gateway.push_to_user(user, &message).await {
            warn!("push dispatch for {user} failed: {error}");
        }
    });
}
