//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use quadmart_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::Forbidden => {
            StatusError::forbidden().brief("Caller may not act on this order")
        }
        OrdersServiceError::EmptyOrder => {
            StatusError::bad_request().brief("Order must contain at least one item")
        }
        transition @ OrdersServiceError::InvalidTransition { .. } => {
            StatusError::bad_request().brief(transition.to_string())
        }
        OrdersServiceError::Fulfillment(source) => {
            StatusError::bad_request().brief(source.to_string())
        }
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        // A nonexistent vendor or product is a missing resource, not a
        // malformed payload.
        OrdersServiceError::InvalidReference => {
            StatusError::not_found().brief("Referenced resource not found")
        }
        OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
