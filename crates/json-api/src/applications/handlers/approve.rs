//! Approve Vendor Application Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    applications::errors::into_status_error, extensions::*, state::State,
    vendors::get::VendorResponse,
};

/// Approve Vendor Application Handler
///
/// Approves a pending application, creating the vendor owned by the applicant
/// and promoting their role. Admin only.
#[endpoint(
    tags("applications"),
    summary = "Approve Vendor Application",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Vendor created from application"),
        (status_code = StatusCode::FORBIDDEN, description = "Only admins may review applications"),
        (status_code = StatusCode::NOT_FOUND, description = "Application not found"),
        (status_code = StatusCode::CONFLICT, description = "Application already reviewed"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<VendorResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let vendor = state
        .app
        .applications
        .approve_application(principal, uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(vendor.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use quadmart_app::domain::{
        applications::{
            ApplicationsServiceError, MockApplicationsService,
            models::{ApplicationStatus, ApplicationUuid},
        },
        vendors::models::VendorUuid,
    };

    use crate::test_helpers::{
        admin_principal, admin_service, make_vendor, member_service, state_with_applications,
    };

    use super::*;

    #[tokio::test]
    async fn test_approve_creates_vendor() -> TestResult {
        let uuid = ApplicationUuid::new();
        let vendor_uuid = VendorUuid::new();
        let vendor = make_vendor(vendor_uuid);

        let mut applications = MockApplicationsService::new();

        applications
            .expect_approve_application()
            .once()
            .withf(move |caller, a| *caller == admin_principal() && *a == uuid)
            .return_once(move |_, _| Ok(vendor));

        applications.expect_submit_application().never();
        applications.expect_get_own_application().never();
        applications.expect_list_applications().never();
        applications.expect_reject_application().never();

        let service = admin_service(
            state_with_applications(applications),
            Router::with_path("applications/{uuid}/approve").post(handler),
        );

        let mut res =
            TestClient::post(format!("http://example.com/applications/{uuid}/approve"))
                .send(&service)
                .await;

        let body: VendorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.uuid, vendor_uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_approve_as_member_returns_403() -> TestResult {
        let uuid = ApplicationUuid::new();

        let mut applications = MockApplicationsService::new();

        applications
            .expect_approve_application()
            .once()
            .return_once(|_, _| Err(ApplicationsServiceError::Forbidden));

        applications.expect_submit_application().never();
        applications.expect_get_own_application().never();
        applications.expect_list_applications().never();
        applications.expect_reject_application().never();

        let service = member_service(
            state_with_applications(applications),
            Router::with_path("applications/{uuid}/approve").post(handler),
        );

        let res = TestClient::post(format!("http://example.com/applications/{uuid}/approve"))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_approve_already_reviewed_returns_409() -> TestResult {
        let uuid = ApplicationUuid::new();

        let mut applications = MockApplicationsService::new();

        applications
            .expect_approve_application()
            .once()
            .return_once(|_, _| {
                Err(ApplicationsServiceError::AlreadyReviewed(
                    ApplicationStatus::Rejected,
                ))
            });

        applications.expect_submit_application().never();
        applications.expect_get_own_application().never();
        applications.expect_list_applications().never();
        applications.expect_reject_application().never();

        let service = admin_service(
            state_with_applications(applications),
            Router::with_path("applications/{uuid}/approve").post(handler),
        );

        let res = TestClient::post(format!("http://example.com/applications/{uuid}/approve"))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
