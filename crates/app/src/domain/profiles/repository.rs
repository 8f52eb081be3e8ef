//! Profiles Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::profiles::models::{Profile, ProfileUuid, Role};

const CREATE_PROFILE_SQL: &str = include_str!("sql/create_profile.sql");
const GET_PROFILE_SQL: &str = include_str!("sql/get_profile.sql");
const PROMOTE_TO_VENDOR_SQL: &str = include_str!("sql/promote_to_vendor.sql");
const APPLY_LOYALTY_SQL: &str = include_str!("sql/apply_loyalty.sql");
const SPEND_POINTS_SQL: &str = include_str!("sql/spend_points.sql");
const CREDIT_WALLET_SQL: &str = include_str!("sql/credit_wallet.sql");

/// Decode a non-negative `BIGINT` column into a `u64`.
pub(crate) fn try_get_amount(row: &PgRow, index: &str) -> sqlx::Result<u64> {
    let value: i64 = row.try_get(index)?;

    u64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: index.to_string(),
        source: Box::new(e),
    })
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProfilesRepository;

impl PgProfilesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert the profile row if absent, then return it.
    pub(crate) async fn get_or_create_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: Uuid,
    ) -> Result<Profile, sqlx::Error> {
        query(CREATE_PROFILE_SQL).bind(uuid).execute(&mut **tx).await?;

        self.get_profile(tx, ProfileUuid::from_uuid(uuid)).await
    }

    pub(crate) async fn get_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile: ProfileUuid,
    ) -> Result<Profile, sqlx::Error> {
        query_as::<Postgres, Profile>(GET_PROFILE_SQL)
            .bind(profile.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Promote the profile's role to vendor unless it is already admin.
    pub(crate) async fn promote_to_vendor(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile: ProfileUuid,
    ) -> Result<(), sqlx::Error> {
        query(PROMOTE_TO_VENDOR_SQL)
            .bind(profile.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Add earned points and bump the completed order count.
    pub(crate) async fn apply_loyalty(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile: ProfileUuid,
        points: u64,
    ) -> Result<(), sqlx::Error> {
        let points_i64 = i64::try_from(points).map_err(|e| sqlx::Error::ColumnDecode {
            index: "loyalty_points".to_string(),
            source: Box::new(e),
        })?;

        query(APPLY_LOYALTY_SQL)
            .bind(profile.into_uuid())
            .bind(points_i64)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Conditionally deduct points. Returns the number of rows updated: zero
    /// means the balance was insufficient and nothing changed.
    pub(crate) async fn spend_points(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile: ProfileUuid,
        points: u64,
    ) -> Result<u64, sqlx::Error> {
        let points_i64 = i64::try_from(points).map_err(|e| sqlx::Error::ColumnDecode {
            index: "loyalty_points".to_string(),
            source: Box::new(e),
        })?;

        let rows_affected = query(SPEND_POINTS_SQL)
            .bind(profile.into_uuid())
            .bind(points_i64)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn credit_wallet(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile: ProfileUuid,
        amount: u64,
    ) -> Result<u64, sqlx::Error> {
        let amount_i64 = i64::try_from(amount).map_err(|e| sqlx::Error::ColumnDecode {
            index: "wallet_balance".to_string(),
            source: Box::new(e),
        })?;

        let rows_affected = query(CREDIT_WALLET_SQL)
            .bind(profile.into_uuid())
            .bind(amount_i64)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Profile {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let role: String = row.try_get("role")?;

        let role = Role::parse(&role).map_err(|value| sqlx::Error::ColumnDecode {
            index: "role".to_string(),
            source: format!("unknown role: {value}").into(),
        })?;

        Ok(Self {
            uuid: ProfileUuid::from_uuid(row.try_get("uuid")?),
            role,
            wallet_balance: try_get_amount(row, "wallet_balance")?,
            loyalty_points: try_get_amount(row, "loyalty_points")?,
            total_orders: try_get_amount(row, "total_orders")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
