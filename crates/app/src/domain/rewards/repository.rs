//! Rewards Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    profiles::{models::ProfileUuid, repository::try_get_amount},
    rewards::models::{Redemption, RedemptionUuid, Reward, RewardUuid},
};

const LIST_ACTIVE_REWARDS_SQL: &str = include_str!("sql/list_active_rewards.sql");
const GET_REWARD_SQL: &str = include_str!("sql/get_reward.sql");
const CREATE_REDEMPTION_SQL: &str = include_str!("sql/create_redemption.sql");
const LIST_REDEMPTIONS_SQL: &str = include_str!("sql/list_redemptions.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgRewardsRepository;

impl PgRewardsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_active_rewards(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Reward>, sqlx::Error> {
        query_as::<Postgres, Reward>(LIST_ACTIVE_REWARDS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_reward(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        reward: RewardUuid,
    ) -> Result<Reward, sqlx::Error> {
        query_as::<Postgres, Reward>(GET_REWARD_SQL)
            .bind(reward.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_redemption(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        reward: RewardUuid,
        profile: ProfileUuid,
        points_spent: u64,
    ) -> Result<Redemption, sqlx::Error> {
        let points_i64 = i64::try_from(points_spent).map_err(|e| sqlx::Error::ColumnDecode {
            index: "points_spent".to_string(),
            source: Box::new(e),
        })?;

        query_as::<Postgres, Redemption>(CREATE_REDEMPTION_SQL)
            .bind(RedemptionUuid::new().into_uuid())
            .bind(reward.into_uuid())
            .bind(profile.into_uuid())
            .bind(points_i64)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_redemptions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile: ProfileUuid,
    ) -> Result<Vec<Redemption>, sqlx::Error> {
        query_as::<Postgres, Redemption>(LIST_REDEMPTIONS_SQL)
            .bind(profile.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Reward {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: RewardUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            points_required: try_get_amount(row, "points_required")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for Redemption {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: RedemptionUuid::from_uuid(row.try_get("uuid")?),
            reward_uuid: RewardUuid::from_uuid(row.try_get("reward_uuid")?),
            profile_uuid: ProfileUuid::from_uuid(row.try_get("profile_uuid")?),
            points_spent: try_get_amount(row, "points_spent")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
