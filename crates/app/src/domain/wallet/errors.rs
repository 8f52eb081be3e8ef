//! Wallet service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::wallet::checkout::CheckoutError;

#[derive(Debug, Error)]
pub enum WalletServiceError {
    #[error("topup amount must be greater than zero")]
    InvalidAmount,

    #[error("profile not found")]
    NotFound,

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error("related resource not found")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for WalletServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(
                ErrorKind::CheckViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::UniqueViolation,
            ) => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}
