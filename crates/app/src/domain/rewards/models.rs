//! Reward Models

use jiff::Timestamp;

use crate::{domain::profiles::models::ProfileUuid, uuids::TypedUuid};

/// Reward UUID
pub type RewardUuid = TypedUuid<Reward>;

/// Redemption UUID
pub type RedemptionUuid = TypedUuid<Redemption>;

/// Reward Model
#[derive(Debug, Clone)]
pub struct Reward {
    pub uuid: RewardUuid,
    pub name: String,
    pub description: String,
    pub points_required: u64,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// Redemption Model — the points price is frozen at redemption time.
#[derive(Debug, Clone)]
pub struct Redemption {
    pub uuid: RedemptionUuid,
    pub reward_uuid: RewardUuid,
    pub profile_uuid: ProfileUuid,
    pub points_spent: u64,
    pub created_at: Timestamp,
}
