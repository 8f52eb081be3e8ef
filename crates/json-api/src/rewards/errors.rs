//! Reward Errors

use salvo::http::StatusError;
use tracing::error;

use quadmart_app::domain::rewards::RewardsServiceError;

pub(crate) fn into_status_error(error: RewardsServiceError) -> StatusError {
    match error {
        RewardsServiceError::NotFound => StatusError::not_found().brief("Reward not found"),
        RewardsServiceError::Inactive => {
            StatusError::bad_request().brief("Reward is no longer active")
        }
        RewardsServiceError::InsufficientPoints => {
            StatusError::bad_request().brief("Insufficient points")
        }
        RewardsServiceError::InvalidReference | RewardsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid redemption payload")
        }
        RewardsServiceError::Sql(source) => {
            error!("reward storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
