//! Create Product Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quadmart_app::domain::products::models::NewProduct;

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    pub uuid: Uuid,
    pub name: String,
    pub price: u64,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(request: CreateProductRequest) -> Self {
        NewProduct {
            uuid: request.uuid.into(),
            name: request.name,
            price: request.price,
        }
    }
}

/// Product Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductCreatedResponse {
    /// Created product UUID
    pub uuid: Uuid,
}

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::CONFLICT, description = "Product already exists"),
        (status_code = StatusCode::FORBIDDEN, description = "Caller does not own this vendor"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let uuid = state
        .app
        .products
        .create_product(principal, uuid.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?
        .uuid;

    res.add_header(LOCATION, format!("/products/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(ProductCreatedResponse { uuid: uuid.into() }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use quadmart_app::domain::{
        products::{MockProductsService, ProductsServiceError, models::ProductUuid},
        vendors::models::VendorUuid,
    };

    use crate::test_helpers::{make_product, member_principal, member_service, state_with_products};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        member_service(
            state_with_products(products),
            Router::with_path("vendors/{uuid}/products").post(handler),
        )
    }

    #[tokio::test]
    async fn test_create_product_success() -> TestResult {
        let vendor = VendorUuid::new();
        let uuid = ProductUuid::new();
        let product = make_product(uuid, vendor);

        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .withf(move |caller, v, new| {
                *caller == member_principal()
                    && *v == vendor
                    && *new
                        == NewProduct {
                            uuid,
                            name: "Flat white".to_string(),
                            price: 3_50,
                        }
            })
            .return_once(move |_, _, _| Ok(product));

        products.expect_get_product().never();
        products.expect_list_vendor_products().never();
        products.expect_update_product().never();
        products.expect_delete_product().never();

        let mut res = TestClient::post(format!("http://example.com/vendors/{vendor}/products"))
            .json(&json!({ "uuid": uuid.into_uuid(), "name": "Flat white", "price": 350 }))
            .send(&make_service(products))
            .await;

        let body: ProductCreatedResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/products/{uuid}").as_str()));
        assert_eq!(body.uuid, uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_not_owner_returns_403() -> TestResult {
        let vendor = VendorUuid::new();
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .return_once(|_, _, _| Err(ProductsServiceError::Forbidden));

        products.expect_get_product().never();
        products.expect_list_vendor_products().never();
        products.expect_update_product().never();
        products.expect_delete_product().never();

        let res = TestClient::post(format!("http://example.com/vendors/{vendor}/products"))
            .json(&json!({ "uuid": uuid.into_uuid(), "name": "Flat white", "price": 350 }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_conflict_returns_409() -> TestResult {
        let vendor = VendorUuid::new();
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .return_once(|_, _, _| Err(ProductsServiceError::AlreadyExists));

        products.expect_get_product().never();
        products.expect_list_vendor_products().never();
        products.expect_update_product().never();
        products.expect_delete_product().never();

        let res = TestClient::post(format!("http://example.com/vendors/{vendor}/products"))
            .json(&json!({ "uuid": uuid.into_uuid(), "name": "Flat white", "price": 350 }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
