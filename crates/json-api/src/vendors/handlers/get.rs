//! Get Vendor Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quadmart_app::domain::vendors::models::Vendor;

use crate::{extensions::*, state::State, vendors::errors::into_status_error};

/// Vendor Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VendorResponse {
    /// Vendor UUID
    pub uuid: Uuid,

    /// Owning profile UUID
    pub owner_uuid: Uuid,

    /// Display name
    pub name: String,

    /// Description
    pub description: String,

    /// Campus location
    pub location: String,

    /// Storefront image URL
    pub image_url: Option<String>,

    /// Whether the vendor sells products or services
    pub vendor_type: String,

    /// Free-form business type label
    pub custom_business_type: Option<String>,

    /// Search tags
    pub tags: Vec<String>,

    /// Whether the vendor is currently taking orders
    pub is_open: bool,

    /// Whether the vendor is featured in listings
    pub is_featured: bool,

    /// Whether pickup is offered
    pub offers_pickup: bool,

    /// Whether delivery is offered
    pub offers_delivery: bool,

    /// Average rating
    pub rating: f64,

    /// When the vendor was created
    pub created_at: String,

    /// When the vendor was last updated
    pub updated_at: String,
}

impl From<Vendor> for VendorResponse {
    fn from(vendor: Vendor) -> Self {
        VendorResponse {
            uuid: vendor.uuid.into(),
            owner_uuid: vendor.owner_uuid.into(),
            name: vendor.name,
            description: vendor.description,
            location: vendor.location,
            image_url: vendor.image_url,
            vendor_type: vendor.vendor_type.as_str().to_string(),
            custom_business_type: vendor.custom_business_type,
            tags: vendor.tags,
            is_open: vendor.is_open,
            is_featured: vendor.is_featured,
            offers_pickup: vendor.offers_pickup,
            offers_delivery: vendor.offers_delivery,
            rating: vendor.rating,
            created_at: vendor.created_at.to_string(),
            updated_at: vendor.updated_at.to_string(),
        }
    }
}

/// Get Vendor Handler
///
/// Returns a vendor.
#[endpoint(
    tags("vendors"),
    summary = "Get Vendor",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<VendorResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _principal = depot.principal_or_401()?;

    let vendor = state
        .app
        .vendors
        .get_vendor(uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(vendor.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use quadmart_app::domain::vendors::{
        MockVendorsService, VendorsServiceError, models::VendorUuid,
    };

    use crate::test_helpers::{make_vendor, member_service, state_with_vendors};

    use super::*;

    fn make_service(vendors: MockVendorsService) -> Service {
        member_service(
            state_with_vendors(vendors),
            Router::with_path("vendors/{uuid}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_get_vendor_returns_200() -> TestResult {
        let uuid = VendorUuid::new();
        let vendor = make_vendor(uuid);

        let mut vendors = MockVendorsService::new();

        vendors
            .expect_get_vendor()
            .once()
            .withf(move |v| *v == uuid)
            .return_once(move |_| Ok(vendor));

        vendors.expect_list_vendors().never();
        vendors.expect_update_vendor().never();

        let response: VendorResponse = TestClient::get(format!("http://example.com/vendors/{uuid}"))
            .send(&make_service(vendors))
            .await
            .take_json()
            .await?;

        assert_eq!(response.uuid, uuid.into_uuid());
        assert_eq!(response.vendor_type, "product");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_vendor_returns_404() -> TestResult {
        let uuid = VendorUuid::new();

        let mut vendors = MockVendorsService::new();

        vendors
            .expect_get_vendor()
            .once()
            .withf(move |v| *v == uuid)
            .return_once(|_| Err(VendorsServiceError::NotFound));

        vendors.expect_list_vendors().never();
        vendors.expect_update_vendor().never();

        let res = TestClient::get(format!("http://example.com/vendors/{uuid}"))
            .send(&make_service(vendors))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_vendor_invalid_uuid_returns_400() -> TestResult {
        let res = TestClient::get("http://example.com/vendors/123")
            .send(&make_service(MockVendorsService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
