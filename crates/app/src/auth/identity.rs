//! Identity provider client for session verification.

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

/// Configuration for connecting to the identity provider.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Identity provider address, e.g. `"http://localhost:9000"`.
    pub addr: String,

    /// Service API key for the verification endpoint.
    pub api_key: String,
}

/// Verifies bearer tokens against the hosted identity provider.
#[automock]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve a session token to the stable user id it belongs to.
    async fn verify_session(&self, token: &str) -> Result<Uuid, IdentityError>;
}

/// HTTP client for the identity provider's session-verification endpoint.
#[derive(Debug, Clone)]
pub struct IdentityHttpClient {
    config: IdentityConfig,
    http: Client,
}

impl IdentityHttpClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: IdentityConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl IdentityProvider for IdentityHttpClient {
    async fn verify_session(&self, token: &str) -> Result<Uuid, IdentityError> {
        let url = format!("{}/v1/sessions/verify", self.config.addr);

        let body = serde_json::json!({ "token": token });

        let response = self
            .http
            .post(&url)
            .header("X-Api-Key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::NOT_FOUND
        ) {
            return Err(IdentityError::InvalidToken);
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(IdentityError::UnexpectedResponse(format!(
                "session verification failed with status {status}: {text}"
            )));
        }

        let parsed: VerifyResponse = response.json().await?;

        Ok(parsed.user_id)
    }
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    user_id: Uuid,
}

/// Errors that can occur when communicating with the identity provider.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The token is not a live session.
    #[error("invalid session token")]
    InvalidToken,

    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider returned a non-2xx response or unexpected body.
    #[error("unexpected response from identity provider: {0}")]
    UnexpectedResponse(String),
}
