//! Vendor Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, state::State, vendors::get::VendorResponse};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VendorsResponse {
    /// The list of vendors, featured first
    pub vendors: Vec<VendorResponse>,
}

/// Vendor Index Handler
///
/// Returns all vendors, featured first.
#[endpoint(
    tags("vendors"),
    summary = "List Vendors",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<VendorsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _principal = depot.principal_or_401()?;

    let vendors = state
        .app
        .vendors
        .list_vendors()
        .await
        .or_500("failed to fetch vendors")?;

    Ok(Json(VendorsResponse {
        vendors: vendors.into_iter().map(Into::into).collect(),
    }))
}
