//! Update Vendor Handler

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

use quadmart_app::domain::vendors::models::VendorUpdate;

use crate::{
    extensions::*,
    state::State,
    vendors::{errors::into_status_error, get::VendorResponse},
};

/// Update Vendor Request — absent fields keep their current value.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateVendorRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub is_open: Option<bool>,
    pub offers_pickup: Option<bool>,
    pub offers_delivery: Option<bool>,
}

impl From<UpdateVendorRequest> for VendorUpdate {
    fn from(request: UpdateVendorRequest) -> Self {
        VendorUpdate {
            name: request.name,
            description: request.description,
            location: request.location,
            image_url: request.image_url,
            is_open: request.is_open,
            offers_pickup: request.offers_pickup,
            offers_delivery: request.offers_delivery,
        }
    }
}

/// Update Vendor Handler
#[endpoint(
    tags("vendors"),
    summary = "Update Vendor",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Vendor updated"),
        (status_code = StatusCode::FORBIDDEN, description = "Caller does not own this vendor"),
        (status_code = StatusCode::NOT_FOUND, description = "Vendor not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<UpdateVendorRequest>,
    depot: &mut Depot,
) -> Result<Json<VendorResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let vendor = state
        .app
        .vendors
        .update_vendor(principal, uuid.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(vendor.into()))
}
