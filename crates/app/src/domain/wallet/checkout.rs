//! Payment gateway client for hosted checkout sessions.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::profiles::models::ProfileUuid;

/// Configuration for connecting to the payment gateway.
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    /// Payment gateway address, e.g. `"https://api.gateway.example"`.
    pub addr: String,

    /// Secret API key for session creation.
    pub api_key: String,
}

/// Creates hosted checkout sessions for wallet topups.
#[automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a checkout session for `amount` cents tagged with the profile,
    /// returning the hosted payment page URL.
    async fn create_checkout_session(
        &self,
        profile: ProfileUuid,
        amount: u64,
    ) -> Result<String, CheckoutError>;
}

/// HTTP client for the payment gateway's checkout endpoint.
#[derive(Debug, Clone)]
pub struct CheckoutClient {
    config: CheckoutConfig,
    http: Client,
}

impl CheckoutClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: CheckoutConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl PaymentGateway for CheckoutClient {
    async fn create_checkout_session(
        &self,
        profile: ProfileUuid,
        amount: u64,
    ) -> Result<String, CheckoutError> {
        let url = format!("{}/v1/checkout/sessions", self.config.addr);

        let body = serde_json::json!({
            "amount": amount,
            "currency": "usd",
            "metadata": { "profile_uuid": profile.to_string() },
        });

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(CheckoutError::UnexpectedResponse(format!(
                "checkout session creation failed with status {status}: {text}"
            )));
        }

        let parsed: SessionResponse = response.json().await?;

        Ok(parsed.url)
    }
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    url: String,
}

/// Errors that can occur when communicating with the payment gateway.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway returned a non-2xx response or unexpected body.
    #[error("unexpected response from payment gateway: {0}")]
    UnexpectedResponse(String),
}
