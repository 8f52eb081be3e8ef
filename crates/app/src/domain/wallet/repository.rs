//! Wallet Credits Repository

use sqlx::{Postgres, Transaction, query};

use crate::domain::wallet::models::WalletCreditEvent;

const RECORD_CREDIT_EVENT_SQL: &str = include_str!("sql/record_credit_event.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgWalletRepository;

impl PgWalletRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Record a gateway event in the processed-events ledger. Returns the
    /// number of rows inserted: zero means the event was seen before.
    pub(crate) async fn record_credit_event(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event: &WalletCreditEvent,
    ) -> Result<u64, sqlx::Error> {
        let amount_i64 = i64::try_from(event.amount).map_err(|e| sqlx::Error::ColumnDecode {
            index: "amount".to_string(),
            source: Box::new(e),
        })?;

        let rows_affected = query(RECORD_CREDIT_EVENT_SQL)
            .bind(&event.event_id)
            .bind(event.profile_uuid.into_uuid())
            .bind(amount_i64)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}
