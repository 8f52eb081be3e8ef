//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::{
        errors::AuthServiceError,
        identity::IdentityProvider,
        models::Principal,
    },
    database::Db,
    domain::profiles::repository::PgProfilesRepository,
};

#[derive(Clone)]
pub struct PgAuthService {
    db: Db,
    identity: Arc<dyn IdentityProvider>,
    profiles: PgProfilesRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            db,
            identity,
            profiles: PgProfilesRepository::new(),
        }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, token: &str) -> Result<Principal, AuthServiceError> {
        let user = self.identity.verify_session(token).await?;

        // First authenticated access creates the profile row.
        let mut tx = self.db.begin().await?;

        let profile = self.profiles.get_or_create_profile(&mut tx, user).await?;

        tx.commit().await?;

        Ok(Principal {
            user: profile.uuid,
            role: profile.role,
        })
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Authenticate a bearer token and resolve the calling principal.
    async fn authenticate_bearer(&self, token: &str) -> Result<Principal, AuthServiceError>;
}
