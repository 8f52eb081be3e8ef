//! Get Profile Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quadmart_app::domain::profiles::models::Profile;

use crate::{extensions::*, profiles::errors::into_status_error, state::State};

/// Profile Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProfileResponse {
    /// Profile UUID
    pub uuid: Uuid,

    /// Platform role
    pub role: String,

    /// Wallet balance in cents
    pub wallet_balance: u64,

    /// Current loyalty point balance
    pub loyalty_points: u64,

    /// Completed order count
    pub total_orders: u64,

    /// Loyalty tier derived from the completed order count
    pub tier: String,

    /// When the profile was created
    pub created_at: String,

    /// When the profile was last updated
    pub updated_at: String,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        let tier = profile.tier();

        ProfileResponse {
            uuid: profile.uuid.into(),
            role: profile.role.as_str().to_string(),
            wallet_balance: profile.wallet_balance,
            loyalty_points: profile.loyalty_points,
            total_orders: profile.total_orders,
            tier: tier.as_str().to_string(),
            created_at: profile.created_at.to_string(),
            updated_at: profile.updated_at.to_string(),
        }
    }
}

/// Get Profile Handler
///
/// Returns the calling user's profile with its derived loyalty tier.
#[endpoint(
    tags("profiles"),
    summary = "Get own profile",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProfileResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let profile = state
        .app
        .profiles
        .get_profile(principal.user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(profile.into()))
}
