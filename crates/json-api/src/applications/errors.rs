//! Vendor Application Errors

use salvo::http::StatusError;
use tracing::error;

use quadmart_app::domain::applications::ApplicationsServiceError;

pub(crate) fn into_status_error(error: ApplicationsServiceError) -> StatusError {
    match error {
        ApplicationsServiceError::NotFound => {
            StatusError::not_found().brief("Application not found")
        }
        ApplicationsServiceError::Forbidden => {
            StatusError::forbidden().brief("Only admins may review applications")
        }
        // One application per profile; resubmission is a validation failure,
        // not a conflict.
        ApplicationsServiceError::AlreadyApplied => {
            StatusError::bad_request().brief("An application has already been submitted")
        }
        reviewed @ ApplicationsServiceError::AlreadyReviewed(_) => {
            StatusError::conflict().brief(reviewed.to_string())
        }
        ApplicationsServiceError::InvalidReference | ApplicationsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid application payload")
        }
        ApplicationsServiceError::Sql(source) => {
            error!("application storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
