//! Profile Errors

use salvo::http::StatusError;
use tracing::error;

use quadmart_app::domain::profiles::ProfilesServiceError;

pub(crate) fn into_status_error(error: ProfilesServiceError) -> StatusError {
    match error {
        ProfilesServiceError::NotFound => StatusError::not_found().brief("Profile not found"),
        ProfilesServiceError::InvalidReference | ProfilesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid profile payload")
        }
        ProfilesServiceError::Sql(source) => {
            error!("profile storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
