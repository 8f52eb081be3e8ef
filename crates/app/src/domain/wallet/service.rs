//! Wallet service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::models::Principal,
    database::Db,
    domain::{
        profiles::repository::PgProfilesRepository,
        wallet::{
            checkout::PaymentGateway,
            errors::WalletServiceError,
            models::{CreditOutcome, WalletCreditEvent},
            repository::PgWalletRepository,
        },
    },
};

#[derive(Clone)]
pub struct PgWalletService {
    db: Db,
    repository: PgWalletRepository,
    profiles: PgProfilesRepository,
    gateway: Arc<dyn PaymentGateway>,
}

impl PgWalletService {
    #[must_use]
    pub fn new(db: Db, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self {
            db,
            repository: PgWalletRepository::new(),
            profiles: PgProfilesRepository::new(),
            gateway,
        }
    }
}

#[async_trait]
impl WalletService for PgWalletService {
    async fn topup(&self, caller: Principal, amount: u64) -> Result<String, WalletServiceError> {
        if amount == 0 {
            return Err(WalletServiceError::InvalidAmount);
        }

        let url = self
            .gateway
            .create_checkout_session(caller.user, amount)
            .await?;

        Ok(url)
    }

    async fn credit(
        &self,
        event: WalletCreditEvent,
    ) -> Result<CreditOutcome, WalletServiceError> {
        if event.amount == 0 {
            return Err(WalletServiceError::InvalidAmount);
        }

        let mut tx = self.db.begin().await?;

        // The ledger insert and the balance update commit together, so a
        // redelivered event either replays entirely or not at all.
        let inserted = self.repository.record_credit_event(&mut tx, &event).await?;

        if inserted == 0 {
            return Ok(CreditOutcome::AlreadyProcessed);
        }

        let credited = self
            .profiles
            .credit_wallet(&mut tx, event.profile_uuid, event.amount)
            .await?;

        if credited == 0 {
            return Err(WalletServiceError::NotFound);
        }

        tx.commit().await?;

        info!(
            "credited {} cents to {} for gateway event {}",
            event.amount, event.profile_uuid, event.event_id
        );

        Ok(CreditOutcome::Credited)
    }
}

#[automock]
#[async_trait]
pub trait WalletService: Send + Sync {
    /// Start a wallet topup: returns the hosted checkout URL to redirect the
    /// caller to. The balance only changes when the gateway webhook lands.
    async fn topup(&self, caller: Principal, amount: u64) -> Result<String, WalletServiceError>;

    /// Apply a verified gateway credit event. Safe under redelivery: each
    /// event id credits at most once.
    async fn credit(&self, event: WalletCreditEvent)
    -> Result<CreditOutcome, WalletServiceError>;
}
