//! Profiles service.

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::profiles::{
        errors::ProfilesServiceError,
        models::{Profile, ProfileUuid},
        repository::PgProfilesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProfilesService {
    db: Db,
    repository: PgProfilesRepository,
}

impl PgProfilesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProfilesRepository::new(),
        }
    }
}

#[async_trait]
impl ProfilesService for PgProfilesService {
    async fn get_or_create_profile(&self, user: Uuid) -> Result<Profile, ProfilesServiceError> {
        let mut tx = self.db.begin().await?;

        let profile = self.repository.get_or_create_profile(&mut tx, user).await?;

        tx.commit().await?;

        Ok(profile)
    }

    async fn get_profile(&self, profile: ProfileUuid) -> Result<Profile, ProfilesServiceError> {
        let mut tx = self.db.begin().await?;

        let profile = self.repository.get_profile(&mut tx, profile).await?;

        tx.commit().await?;

        Ok(profile)
    }
}

#[automock]
#[async_trait]
pub trait ProfilesService: Send + Sync {
    /// Fetch the profile for an authenticated user, creating the row on
    /// first access.
    async fn get_or_create_profile(&self, user: Uuid) -> Result<Profile, ProfilesServiceError>;

    /// Retrieve an existing profile.
    async fn get_profile(&self, profile: ProfileUuid) -> Result<Profile, ProfilesServiceError>;
}
