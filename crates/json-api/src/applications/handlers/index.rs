//! Vendor Application Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    applications::{create::ApplicationResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ApplicationsResponse {
    /// All applications, newest first
    pub applications: Vec<ApplicationResponse>,
}

/// Vendor Application Index Handler
///
/// Returns all applications, newest first. Admin only.
#[endpoint(
    tags("applications"),
    summary = "List Vendor Applications",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ApplicationsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let applications = state
        .app
        .applications
        .list_applications(principal)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ApplicationsResponse {
        applications: applications.into_iter().map(Into::into).collect(),
    }))
}
