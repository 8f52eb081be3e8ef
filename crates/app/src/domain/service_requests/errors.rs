//! Service requests service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::service_requests::status::ServiceRequestStatus;

#[derive(Debug, Error)]
pub enum ServiceRequestsServiceError {
    #[error("service request not found")]
    NotFound,

    #[error("caller may not act on this service request")]
    Forbidden,

    #[error("only the vendor may quote a price")]
    QuoteNotAllowed,

    #[error("cannot change service request status from {from:?} to {to:?}")]
    InvalidTransition {
        from: ServiceRequestStatus,
        to: ServiceRequestStatus,
    },

    #[error("vendor does not take service requests")]
    NotAServiceVendor,

    #[error("service request already exists")]
    AlreadyExists,

    #[error("related resource not found")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for ServiceRequestsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}
