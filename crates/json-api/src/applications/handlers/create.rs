//! Create Vendor Application Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quadmart_app::domain::{
    applications::models::{NewVendorApplication, VendorApplication},
    vendors::models::VendorType,
};

use crate::{applications::errors::into_status_error, extensions::*, state::State};

/// Create Vendor Application Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateApplicationRequest {
    pub uuid: Uuid,
    pub name: String,
    pub description: String,
    pub location: String,
    pub image_url: Option<String>,
    /// `"product"` or `"service"`
    pub vendor_type: String,
    pub custom_business_type: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl TryFrom<CreateApplicationRequest> for NewVendorApplication {
    type Error = StatusError;

    fn try_from(request: CreateApplicationRequest) -> Result<Self, Self::Error> {
        let vendor_type = VendorType::parse(&request.vendor_type).map_err(|unknown| {
            StatusError::bad_request().brief(format!("Unknown vendor type: {unknown}"))
        })?;

        Ok(NewVendorApplication {
            uuid: request.uuid.into(),
            name: request.name,
            description: request.description,
            location: request.location,
            image_url: request.image_url,
            vendor_type,
            custom_business_type: request.custom_business_type,
            tags: request.tags,
        })
    }
}

/// Vendor Application Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ApplicationResponse {
    /// Application UUID
    pub uuid: Uuid,

    /// Applying profile UUID
    pub applicant_uuid: Uuid,

    /// Proposed vendor name
    pub name: String,

    /// Proposed description
    pub description: String,

    /// Proposed campus location
    pub location: String,

    /// Proposed storefront image URL
    pub image_url: Option<String>,

    /// Proposed vendor type
    pub vendor_type: String,

    /// Free-form business type label
    pub custom_business_type: Option<String>,

    /// Proposed search tags
    pub tags: Vec<String>,

    /// Review status
    pub status: String,

    /// Reason given on rejection, if any
    pub rejection_reason: Option<String>,

    /// When the application was reviewed
    pub reviewed_at: Option<String>,

    /// Reviewing admin UUID
    pub reviewed_by: Option<Uuid>,

    /// When the application was submitted
    pub created_at: String,
}

impl From<VendorApplication> for ApplicationResponse {
    fn from(application: VendorApplication) -> Self {
        ApplicationResponse {
            uuid: application.uuid.into(),
            applicant_uuid: application.applicant_uuid.into(),
            name: application.name,
            description: application.description,
            location: application.location,
            image_url: application.image_url,
            vendor_type: application.vendor_type.as_str().to_string(),
            custom_business_type: application.custom_business_type,
            tags: application.tags,
            status: application.status.as_str().to_string(),
            rejection_reason: application.rejection_reason,
            reviewed_at: application.reviewed_at.map(|at| at.to_string()),
            reviewed_by: application.reviewed_by.map(Into::into),
            created_at: application.created_at.to_string(),
        }
    }
}

/// Create Vendor Application Handler
#[endpoint(
    tags("applications"),
    summary = "Submit Vendor Application",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Application submitted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateApplicationRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ApplicationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let new_application = json.into_inner().try_into()?;

    let application = state
        .app
        .applications
        .submit_application(principal, new_application)
        .await
        .map_err(into_status_error)?;

    res.add_header(
        LOCATION,
        format!("/applications/{}", application.uuid),
        true,
    )
    .or_500("failed to set location header")?
    .status_code(StatusCode::CREATED);

    Ok(Json(application.into()))
}
