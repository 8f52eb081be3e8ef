//! Create Service Request Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quadmart_app::domain::service_requests::models::{NewServiceRequest, ServiceRequest};

use crate::{extensions::*, service_requests::errors::into_status_error, state::State};

/// Create Service Request Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateServiceRequestRequest {
    pub uuid: Uuid,
    pub vendor_uuid: Uuid,
    pub service_name: String,
    pub description: String,
    /// Storage URLs for uploaded attachments
    #[serde(default)]
    pub attachments: Vec<String>,
}

impl From<CreateServiceRequestRequest> for NewServiceRequest {
    fn from(request: CreateServiceRequestRequest) -> Self {
        NewServiceRequest {
            uuid: request.uuid.into(),
            vendor: request.vendor_uuid.into(),
            service_name: request.service_name,
            description: request.description,
            attachments: request.attachments,
        }
    }
}

/// Service Request Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ServiceRequestResponse {
    /// Service request UUID
    pub uuid: Uuid,

    /// Requesting customer UUID
    pub customer_uuid: Uuid,

    /// Vendor UUID
    pub vendor_uuid: Uuid,

    /// Requested service name
    pub service_name: String,

    /// Description of the work
    pub description: String,

    /// Attachment storage URLs
    pub attachments: Vec<String>,

    /// Lifecycle status
    pub status: String,

    /// Vendor's quoted price in cents, if any
    pub quoted_price: Option<u64>,

    /// When the request was submitted
    pub created_at: String,

    /// When the request was last updated
    pub updated_at: String,
}

impl From<ServiceRequest> for ServiceRequestResponse {
    fn from(request: ServiceRequest) -> Self {
        ServiceRequestResponse {
            uuid: request.uuid.into(),
            customer_uuid: request.customer_uuid.into(),
            vendor_uuid: request.vendor_uuid.into(),
            service_name: request.service_name,
            description: request.description,
            attachments: request.attachments,
            status: request.status.as_str().to_string(),
            quoted_price: request.quoted_price,
            created_at: request.created_at.to_string(),
            updated_at: request.updated_at.to_string(),
        }
    }
}

/// Create Service Request Handler
#[endpoint(
    tags("service-requests"),
    summary = "Create Service Request",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Service request created"),
        (status_code = StatusCode::NOT_FOUND, description = "Vendor not found"),
        (status_code = StatusCode::CONFLICT, description = "Service request already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateServiceRequestRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ServiceRequestResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let request = state
        .app
        .service_requests
        .create_service_request(principal, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(
        LOCATION,
        format!("/service-requests/{}", request.uuid),
        true,
    )
    .or_500("failed to set location header")?
    .status_code(StatusCode::CREATED);

    Ok(Json(request.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use quadmart_app::domain::{
        service_requests::{
            MockServiceRequestsService, ServiceRequestsServiceError,
            models::ServiceRequestUuid,
        },
        vendors::models::VendorUuid,
    };

    use crate::test_helpers::{
        make_service_request, member_principal, member_service, state_with_service_requests,
    };

    use super::*;

    fn make_service(service_requests: MockServiceRequestsService) -> Service {
        member_service(
            state_with_service_requests(service_requests),
            Router::with_path("service-requests").post(handler),
        )
    }

    #[tokio::test]
    async fn test_create_service_request_success() -> TestResult {
        let uuid = ServiceRequestUuid::new();
        let vendor = VendorUuid::new();
        let request = make_service_request(uuid, vendor);

        let mut service_requests = MockServiceRequestsService::new();

        service_requests
            .expect_create_service_request()
            .once()
            .withf(move |caller, new| {
                *caller == member_principal()
                    && *new
                        == NewServiceRequest {
                            uuid,
                            vendor,
                            service_name: "Laptop repair".to_string(),
                            description: "Cracked hinge.".to_string(),
                            attachments: vec![],
                        }
            })
            .return_once(move |_, _| Ok(request));

        service_requests.expect_get_service_request().never();
        service_requests.expect_list_own_service_requests().never();
        service_requests.expect_list_vendor_service_requests().never();
        service_requests.expect_update_service_request().never();

        let mut res = TestClient::post("http://example.com/service-requests")
            .json(&json!({
                "uuid": uuid.into_uuid(),
                "vendor_uuid": vendor.into_uuid(),
                "service_name": "Laptop repair",
                "description": "Cracked hinge.",
            }))
            .send(&make_service(service_requests))
            .await;

        let body: ServiceRequestResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.uuid, uuid.into_uuid());
        assert_eq!(body.status, "pending");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_against_product_vendor_returns_400() -> TestResult {
        let mut service_requests = MockServiceRequestsService::new();

        service_requests
            .expect_create_service_request()
            .once()
            .return_once(|_, _| Err(ServiceRequestsServiceError::NotAServiceVendor));

        service_requests.expect_get_service_request().never();
        service_requests.expect_list_own_service_requests().never();
        service_requests.expect_list_vendor_service_requests().never();
        service_requests.expect_update_service_request().never();

        let res = TestClient::post("http://example.com/service-requests")
            .json(&json!({
                "uuid": Uuid::now_v7(),
                "vendor_uuid": Uuid::now_v7(),
                "service_name": "Laptop repair",
                "description": "Cracked hinge.",
            }))
            .send(&make_service(service_requests))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_for_unknown_vendor_returns_404() -> TestResult {
        let mut service_requests = MockServiceRequestsService::new();

        service_requests
            .expect_create_service_request()
            .once()
            .return_once(|_, _| Err(ServiceRequestsServiceError::InvalidReference));

        service_requests.expect_get_service_request().never();
        service_requests.expect_list_own_service_requests().never();
        service_requests.expect_list_vendor_service_requests().never();
        service_requests.expect_update_service_request().never();

        let res = TestClient::post("http://example.com/service-requests")
            .json(&json!({
                "uuid": Uuid::now_v7(),
                "vendor_uuid": Uuid::now_v7(),
                "service_name": "Laptop repair",
                "description": "Cracked hinge.",
            }))
            .send(&make_service(service_requests))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
