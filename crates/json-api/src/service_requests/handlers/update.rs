//! Update Service Request Handler

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

use quadmart_app::domain::service_requests::{
    ServiceRequestStatus, models::ServiceRequestUpdate,
};

use crate::{
    extensions::*,
    service_requests::{create::ServiceRequestResponse, errors::into_status_error},
    state::State,
};

/// Update Service Request Request — absent fields keep their current value.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateServiceRequestRequest {
    /// Target lifecycle status
    pub status: Option<String>,

    /// Quoted price in cents; vendor only
    pub quoted_price: Option<u64>,
}

impl TryFrom<UpdateServiceRequestRequest> for ServiceRequestUpdate {
    type Error = StatusError;

    fn try_from(request: UpdateServiceRequestRequest) -> Result<Self, Self::Error> {
        let status = request
            .status
            .as_deref()
            .map(ServiceRequestStatus::parse)
            .transpose()
            .map_err(|unknown| {
                StatusError::bad_request()
                    .brief(format!("Unknown service request status: {unknown}"))
            })?;

        Ok(ServiceRequestUpdate {
            status,
            quoted_price: request.quoted_price,
        })
    }
}

/// Update Service Request Handler
///
/// Advances the request lifecycle or attaches a quote.
#[endpoint(
    tags("service-requests"),
    summary = "Update Service Request",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Service request updated"),
        (status_code = StatusCode::FORBIDDEN, description = "Caller may not act on this service request"),
        (status_code = StatusCode::NOT_FOUND, description = "Service request not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<UpdateServiceRequestRequest>,
    depot: &mut Depot,
) -> Result<Json<ServiceRequestResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let update = json.into_inner().try_into()?;

    let request = state
        .app
        .service_requests
        .update_service_request(principal, uuid.into_inner().into(), update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(request.into()))
}
