//! Reject Vendor Application Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    applications::{create::ApplicationResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Reject Vendor Application Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RejectApplicationRequest {
    /// Reason shown to the applicant
    pub reason: Option<String>,
}

/// Reject Vendor Application Handler
///
/// Rejects a pending application with an optional reason. Admin only.
#[endpoint(
    tags("applications"),
    summary = "Reject Vendor Application",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Application rejected"),
        (status_code = StatusCode::FORBIDDEN, description = "Only admins may review applications"),
        (status_code = StatusCode::NOT_FOUND, description = "Application not found"),
        (status_code = StatusCode::CONFLICT, description = "Application already reviewed"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<RejectApplicationRequest>,
    depot: &mut Depot,
) -> Result<Json<ApplicationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let application = state
        .app
        .applications
        .reject_application(principal, uuid.into_inner().into(), json.into_inner().reason)
        .await
        .map_err(into_status_error)?;

    Ok(Json(application.into()))
}
