//! Applications service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::applications::models::ApplicationStatus;

#[derive(Debug, Error)]
pub enum ApplicationsServiceError {
    #[error("application not found")]
    NotFound,

    #[error("only admins may review applications")]
    Forbidden,

    #[error("an application has already been submitted")]
    AlreadyApplied,

    #[error("application has already been reviewed as {0:?}")]
    AlreadyReviewed(ApplicationStatus),

    #[error("related resource not found")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for ApplicationsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            // The partial unique index on live applications per applicant.
            Some(ErrorKind::UniqueViolation) => Self::AlreadyApplied,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}
