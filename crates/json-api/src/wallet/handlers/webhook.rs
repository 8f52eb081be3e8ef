//! Wallet Webhook Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quadmart_app::domain::wallet::models::{CreditOutcome, WalletCreditEvent};

use crate::{extensions::*, state::State, wallet::errors::into_status_error};

/// Wallet Webhook Request
///
/// A payment-gateway credit event. `event_id` is the gateway's stable
/// identifier and the deduplication key under redelivery.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WebhookRequest {
    pub event_id: String,
    pub profile_uuid: Uuid,
    /// Credited amount, in cents
    pub amount: u64,
}

impl From<WebhookRequest> for WalletCreditEvent {
    fn from(request: WebhookRequest) -> Self {
        WalletCreditEvent {
            event_id: request.event_id,
            profile_uuid: request.profile_uuid.into(),
            amount: request.amount,
        }
    }
}

/// Wallet Webhook Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WebhookResponse {
    /// `"credited"` or `"already_processed"`
    pub status: String,
}

impl From<CreditOutcome> for WebhookResponse {
    fn from(outcome: CreditOutcome) -> Self {
        let status = match outcome {
            CreditOutcome::Credited => "credited",
            CreditOutcome::AlreadyProcessed => "already_processed",
        };

        WebhookResponse {
            status: status.to_string(),
        }
    }
}

/// Wallet Webhook Handler
///
/// Applies a gateway credit event to the profile's wallet. Redelivered
/// events are acknowledged without crediting twice.
#[endpoint(
    tags("wallet"),
    summary = "Payment Gateway Webhook",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Event processed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "Profile not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<WebhookRequest>,
    depot: &mut Depot,
) -> Result<Json<WebhookResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let outcome = state
        .app
        .wallet
        .credit(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(outcome.into()))
}
