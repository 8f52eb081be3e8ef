//! Vendors service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::fulfillment::FulfillmentError;

#[derive(Debug, Error)]
pub enum VendorsServiceError {
    #[error("vendor not found")]
    NotFound,

    #[error("caller does not own this vendor")]
    Forbidden,

    #[error("vendor must offer pickup or delivery")]
    NoFulfillmentMethod,

    #[error("vendor already exists")]
    AlreadyExists,

    #[error("related resource not found")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for VendorsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            // The vendors table carries the same both-flags CHECK the
            // validator enforces up front.
            Some(ErrorKind::CheckViolation) => Self::NoFulfillmentMethod,
            Some(ErrorKind::NotNullViolation) => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}

impl From<FulfillmentError> for VendorsServiceError {
    fn from(_error: FulfillmentError) -> Self {
        Self::NoFulfillmentMethod
    }
}
