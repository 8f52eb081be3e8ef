//! Redeem Reward Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quadmart_app::domain::rewards::models::Redemption;

use crate::{extensions::*, rewards::errors::into_status_error, state::State};

/// Redemption Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RedemptionResponse {
    /// Redemption UUID
    pub uuid: Uuid,

    /// Redeemed reward UUID
    pub reward_uuid: Uuid,

    /// Redeeming profile UUID
    pub profile_uuid: Uuid,

    /// Points deducted, frozen at redemption time
    pub points_spent: u64,

    /// When the redemption happened
    pub created_at: String,
}

impl From<Redemption> for RedemptionResponse {
    fn from(redemption: Redemption) -> Self {
        RedemptionResponse {
            uuid: redemption.uuid.into(),
            reward_uuid: redemption.reward_uuid.into(),
            profile_uuid: redemption.profile_uuid.into(),
            points_spent: redemption.points_spent,
            created_at: redemption.created_at.to_string(),
        }
    }
}

/// Redeem Reward Handler
///
/// Deducts the reward's points price from the caller's balance and records
/// the redemption.
#[endpoint(
    tags("rewards"),
    summary = "Redeem Reward",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Reward redeemed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Inactive reward or insufficient points"),
        (status_code = StatusCode::NOT_FOUND, description = "Reward not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<RedemptionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let redemption = state
        .app
        .rewards
        .redeem(principal, uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(redemption.into()))
}
