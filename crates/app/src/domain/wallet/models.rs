//! Wallet Models

use crate::domain::profiles::models::ProfileUuid;

/// A validated payment-gateway event, as delivered by webhook.
///
/// `event_id` is the gateway's stable identifier for the event and the key
/// that makes credits exactly-once under redelivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletCreditEvent {
    pub event_id: String,
    pub profile_uuid: ProfileUuid,
    pub amount: u64,
}

/// Outcome of processing a webhook credit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditOutcome {
    /// The event was fresh and the wallet was credited.
    Credited,
    /// The event had already been processed; nothing changed.
    AlreadyProcessed,
}
