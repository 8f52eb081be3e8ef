//! Reward Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quadmart_app::domain::rewards::models::Reward;

use crate::{extensions::*, rewards::errors::into_status_error, state::State};

/// Reward Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RewardResponse {
    /// Reward UUID
    pub uuid: Uuid,

    /// Reward name
    pub name: String,

    /// Reward description
    pub description: String,

    /// Points price
    pub points_required: u64,

    /// Whether the reward can currently be redeemed
    pub is_active: bool,

    /// When the reward was created
    pub created_at: String,
}

impl From<Reward> for RewardResponse {
    fn from(reward: Reward) -> Self {
        RewardResponse {
            uuid: reward.uuid.into(),
            name: reward.name,
            description: reward.description,
            points_required: reward.points_required,
            is_active: reward.is_active,
            created_at: reward.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RewardsResponse {
    /// Active rewards, cheapest first
    pub rewards: Vec<RewardResponse>,
}

/// Reward Index Handler
///
/// Returns the active rewards catalog, cheapest first.
#[endpoint(tags("rewards"), summary = "List Rewards", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<RewardsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let rewards = state
        .app
        .rewards
        .list_rewards()
        .await
        .map_err(into_status_error)?;

    Ok(Json(RewardsResponse {
        rewards: rewards.into_iter().map(Into::into).collect(),
    }))
}
