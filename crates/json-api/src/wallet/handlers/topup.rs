//! Wallet Topup Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, state::State, wallet::errors::into_status_error};

/// Wallet Topup Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TopupRequest {
    /// Amount to add, in cents
    pub amount: u64,
}

/// Wallet Topup Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TopupResponse {
    /// Hosted checkout URL to redirect the caller to
    pub checkout_url: String,
}

/// Wallet Topup Handler
///
/// Starts a topup with the payment gateway. The balance only changes when
/// the gateway's webhook confirms payment.
#[endpoint(
    tags("wallet"),
    summary = "Start Wallet Topup",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Checkout session created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Payment gateway unavailable"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<TopupRequest>,
    depot: &mut Depot,
) -> Result<Json<TopupResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let checkout_url = state
        .app
        .wallet
        .topup(principal, json.into_inner().amount)
        .await
        .map_err(into_status_error)?;

    Ok(Json(TopupResponse { checkout_url }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use quadmart_app::domain::wallet::{MockWalletService, WalletServiceError};

    use crate::test_helpers::{member_principal, member_service, state_with_wallet};

    use super::*;

    fn make_service(wallet: MockWalletService) -> Service {
        member_service(
            state_with_wallet(wallet),
            Router::with_path("wallet/topup").post(handler),
        )
    }

    #[tokio::test]
    async fn test_topup_returns_checkout_url() -> TestResult {
        let mut wallet = MockWalletService::new();

        wallet
            .expect_topup()
            .once()
            .withf(|caller, amount| *caller == member_principal() && *amount == 25_00)
            .return_once(|_, _| Ok("https://pay.example.com/session/abc".to_string()));

        wallet.expect_credit().never();

        let response: TopupResponse = TestClient::post("http://example.com/wallet/topup")
            .json(&json!({ "amount": 25_00 }))
            .send(&make_service(wallet))
            .await
            .take_json()
            .await?;

        assert_eq!(response.checkout_url, "https://pay.example.com/session/abc");

        Ok(())
    }

    #[tokio::test]
    async fn test_topup_zero_amount_returns_400() -> TestResult {
        let mut wallet = MockWalletService::new();

        wallet
            .expect_topup()
            .once()
            .return_once(|_, _| Err(WalletServiceError::InvalidAmount));

        wallet.expect_credit().never();

        let res = TestClient::post("http://example.com/wallet/topup")
            .json(&json!({ "amount": 0 }))
            .send(&make_service(wallet))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_topup_gateway_failure_returns_502() -> TestResult {
        use quadmart_app::domain::wallet::checkout::CheckoutError;

        let mut wallet = MockWalletService::new();

        wallet.expect_topup().once().return_once(|_, _| {
            Err(WalletServiceError::Checkout(
                CheckoutError::UnexpectedResponse("503 Service Unavailable".to_string()),
            ))
        });

        wallet.expect_credit().never();

        let res = TestClient::post("http://example.com/wallet/topup")
            .json(&json!({ "amount": 10_00 }))
            .send(&make_service(wallet))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_GATEWAY));

        Ok(())
    }
}
