//! Service Request Errors

use salvo::http::StatusError;
use tracing::error;

use quadmart_app::domain::service_requests::ServiceRequestsServiceError;

pub(crate) fn into_status_error(error: ServiceRequestsServiceError) -> StatusError {
    match error {
        ServiceRequestsServiceError::NotFound => {
            StatusError::not_found().brief("Service request not found")
        }
        ServiceRequestsServiceError::Forbidden => {
            StatusError::forbidden().brief("Caller may not act on this service request")
        }
        ServiceRequestsServiceError::QuoteNotAllowed => {
            StatusError::forbidden().brief("Only the vendor may quote a price")
        }
        transition @ ServiceRequestsServiceError::InvalidTransition { .. } => {
            StatusError::bad_request().brief(transition.to_string())
        }
        ServiceRequestsServiceError::NotAServiceVendor => {
            StatusError::bad_request().brief("Vendor does not take service requests")
        }
        ServiceRequestsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Service request already exists")
        }
        // A nonexistent vendor is a missing resource, not a malformed
        // payload.
        ServiceRequestsServiceError::InvalidReference => {
            StatusError::not_found().brief("Referenced resource not found")
        }
        ServiceRequestsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid service request payload")
        }
        ServiceRequestsServiceError::Sql(source) => {
            error!("service request storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
