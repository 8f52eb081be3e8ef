//! Product Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quadmart_app::domain::products::models::Product;

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// Product UUID
    pub uuid: Uuid,

    /// Owning vendor UUID
    pub vendor_uuid: Uuid,

    /// Display name
    pub name: String,

    /// Price in cents
    pub price: u64,

    /// Whether the product can currently be ordered
    pub is_available: bool,

    /// When the product was created
    pub created_at: String,

    /// When the product was last updated
    pub updated_at: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        ProductResponse {
            uuid: product.uuid.into(),
            vendor_uuid: product.vendor_uuid.into(),
            name: product.name,
            price: product.price,
            is_available: product.is_available,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The vendor's live products
    pub products: Vec<ProductResponse>,
}

/// Product Index Handler
///
/// Returns a vendor's live products.
#[endpoint(
    tags("products"),
    summary = "List Vendor Products",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _principal = depot.principal_or_401()?;

    let products = state
        .app
        .products
        .list_vendor_products(uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use quadmart_app::domain::{
        products::{MockProductsService, models::ProductUuid},
        vendors::models::VendorUuid,
    };

    use crate::test_helpers::{make_product, member_service, state_with_products};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        member_service(
            state_with_products(products),
            Router::with_path("vendors/{uuid}/products").get(handler),
        )
    }

    #[tokio::test]
    async fn test_index_returns_vendor_products() -> TestResult {
        let vendor = VendorUuid::new();
        let uuid_a = ProductUuid::new();
        let uuid_b = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_list_vendor_products()
            .once()
            .withf(move |v| *v == vendor)
            .return_once(move |_| {
                Ok(vec![make_product(uuid_a, vendor), make_product(uuid_b, vendor)])
            });

        products.expect_get_product().never();
        products.expect_create_product().never();
        products.expect_update_product().never();
        products.expect_delete_product().never();

        let response: ProductsResponse =
            TestClient::get(format!("http://example.com/vendors/{vendor}/products"))
                .send(&make_service(products))
                .await
                .take_json()
                .await?;

        assert_eq!(response.products.len(), 2, "expected two products");
        assert_eq!(response.products[0].uuid, uuid_a.into_uuid());
        assert_eq!(response.products[1].vendor_uuid, vendor.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_index_returns_empty_list() -> TestResult {
        let vendor = VendorUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_list_vendor_products()
            .once()
            .withf(move |v| *v == vendor)
            .return_once(|_| Ok(vec![]));

        products.expect_get_product().never();
        products.expect_create_product().never();
        products.expect_update_product().never();
        products.expect_delete_product().never();

        let response: ProductsResponse =
            TestClient::get(format!("http://example.com/vendors/{vendor}/products"))
                .send(&make_service(products))
                .await
                .take_json()
                .await?;

        assert!(response.products.is_empty());

        Ok(())
    }
}
