//! Rewards service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::models::Principal,
    database::Db,
    domain::{
        profiles::repository::PgProfilesRepository,
        rewards::{
            errors::RewardsServiceError,
            models::{Redemption, Reward, RewardUuid},
            repository::PgRewardsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgRewardsService {
    db: Db,
    repository: PgRewardsRepository,
    profiles: PgProfilesRepository,
}

impl PgRewardsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgRewardsRepository::new(),
            profiles: PgProfilesRepository::new(),
        }
    }
}

#[async_trait]
impl RewardsService for PgRewardsService {
    async fn list_rewards(&self) -> Result<Vec<Reward>, RewardsServiceError> {
        let mut tx = self.db.begin().await?;

        let rewards = self.repository.list_active_rewards(&mut tx).await?;

        tx.commit().await?;

        Ok(rewards)
    }

    async fn redeem(
        &self,
        caller: Principal,
        reward: RewardUuid,
    ) -> Result<Redemption, RewardsServiceError> {
        let mut tx = self.db.begin().await?;

        let reward = self.repository.get_reward(&mut tx, reward).await?;

        if !reward.is_active {
            return Err(RewardsServiceError::Inactive);
        }

        // Conditional deduction: zero rows means the guard failed and the
        // balance is untouched.
        let rows_affected = self
            .profiles
            .spend_points(&mut tx, caller.user, reward.points_required)
            .await?;

        if rows_affected == 0 {
            return Err(RewardsServiceError::InsufficientPoints);
        }

        let redemption = self
            .repository
            .create_redemption(&mut tx, reward.uuid, caller.user, reward.points_required)
            .await?;

        tx.commit().await?;

        info!(
            "profile {} redeemed reward {} for {} points",
            caller.user, reward.uuid, reward.points_required
        );

        Ok(redemption)
    }

    async fn list_own_redemptions(
        &self,
        caller: Principal,
    ) -> Result<Vec<Redemption>, RewardsServiceError> {
        let mut tx = self.db.begin().await?;

        let redemptions = self.repository.list_redemptions(&mut tx, caller.user).await?;

        tx.commit().await?;

        Ok(redemptions)
    }
}

#[automock]
#[async_trait]
pub trait RewardsService: Send + Sync {
    /// Retrieve the active rewards, cheapest first.
    async fn list_rewards(&self) -> Result<Vec<Reward>, RewardsServiceError>;

    /// Redeem a reward for the caller, deducting its points price.
    async fn redeem(
        &self,
        caller: Principal,
        reward: RewardUuid,
    ) -> Result<Redemption, RewardsServiceError>;

    /// Retrieve the caller's redemption history, newest first.
    async fn list_own_redemptions(
        &self,
        caller: Principal,
    ) -> Result<Vec<Redemption>, RewardsServiceError>;
}
