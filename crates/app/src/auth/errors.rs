//! Auth service errors.

use thiserror::Error;

use crate::auth::identity::IdentityError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("session not recognised")]
    Unauthenticated,

    #[error("identity provider error")]
    Identity(#[source] IdentityError),

    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}

impl From<IdentityError> for AuthServiceError {
    fn from(error: IdentityError) -> Self {
        match error {
            IdentityError::InvalidToken => Self::Unauthenticated,
            other => Self::Identity(other),
        }
    }
}
