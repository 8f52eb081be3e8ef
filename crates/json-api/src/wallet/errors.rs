//! Wallet Errors

use salvo::http::StatusError;
use tracing::error;

use quadmart_app::domain::wallet::WalletServiceError;

pub(crate) fn into_status_error(error: WalletServiceError) -> StatusError {
    match error {
        WalletServiceError::InvalidAmount => {
            StatusError::bad_request().brief("Amount must be greater than zero")
        }
        WalletServiceError::NotFound => StatusError::not_found().brief("Profile not found"),
        WalletServiceError::Checkout(source) => {
            error!("payment gateway error: {source}");

            StatusError::bad_gateway().brief("Payment gateway unavailable")
        }
        WalletServiceError::InvalidReference | WalletServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid wallet payload")
        }
        WalletServiceError::Sql(source) => {
            error!("wallet storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
