//! Vendor Errors

use salvo::http::StatusError;
use tracing::error;

use quadmart_app::domain::vendors::VendorsServiceError;

pub(crate) fn into_status_error(error: VendorsServiceError) -> StatusError {
    match error {
        VendorsServiceError::NotFound => StatusError::not_found().brief("Vendor not found"),
        VendorsServiceError::Forbidden => {
            StatusError::forbidden().brief("Caller does not own this vendor")
        }
        VendorsServiceError::NoFulfillmentMethod => {
            StatusError::bad_request().brief("Vendor must offer pickup or delivery")
        }
        VendorsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Vendor already exists")
        }
        VendorsServiceError::InvalidReference | VendorsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid vendor payload")
        }
        VendorsServiceError::Sql(source) => {
            error!("vendor storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
