//! Get Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quadmart_app::domain::orders::models::{Order, OrderItem};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Order line item, with the price frozen at order time.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    /// Order item UUID
    pub uuid: Uuid,

    /// Ordered product UUID
    pub product_uuid: Uuid,

    /// Quantity ordered
    pub quantity: u32,

    /// Unit price in cents at order time
    pub price_at_time: u64,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        OrderItemResponse {
            uuid: item.uuid.into(),
            product_uuid: item.product_uuid.into(),
            quantity: item.quantity,
            price_at_time: item.price_at_time,
        }
    }
}

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// Order UUID
    pub uuid: Uuid,

    /// Ordering customer UUID
    pub customer_uuid: Uuid,

    /// Vendor UUID
    pub vendor_uuid: Uuid,

    /// Lifecycle status
    pub status: String,

    /// Order total in cents, frozen at creation
    pub total: u64,

    /// How the order reaches the customer
    pub fulfillment_method: String,

    /// Delivery address, present for delivery orders
    pub delivery_address: Option<String>,

    /// Line items
    pub items: Vec<OrderItemResponse>,

    /// When the order was placed
    pub created_at: String,

    /// When the order was last updated
    pub updated_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        OrderResponse {
            uuid: order.uuid.into(),
            customer_uuid: order.customer_uuid.into(),
            vendor_uuid: order.vendor_uuid.into(),
            status: order.status.as_str().to_string(),
            total: order.total,
            fulfillment_method: order.fulfillment_method.as_str().to_string(),
            delivery_address: order.delivery_address,
            items: order.items.into_iter().map(Into::into).collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Get Order Handler
///
/// Returns one order with its line items.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let order = state
        .app
        .orders
        .get_order(principal, uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use quadmart_app::domain::{
        orders::{MockOrdersService, OrdersServiceError, models::OrderUuid},
        vendors::models::VendorUuid,
    };

    use crate::test_helpers::{make_order, member_principal, member_service, state_with_orders};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        member_service(
            state_with_orders(orders),
            Router::with_path("orders/{uuid}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_get_order_returns_200() -> TestResult {
        let uuid = OrderUuid::new();
        let order = make_order(uuid, VendorUuid::new());

        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .withf(move |caller, o| *caller == member_principal() && *o == uuid)
            .return_once(move |_, _| Ok(order));

        orders.expect_create_order().never();
        orders.expect_list_own_orders().never();
        orders.expect_list_vendor_orders().never();
        orders.expect_update_status().never();

        let response: OrderResponse = TestClient::get(format!("http://example.com/orders/{uuid}"))
            .send(&make_service(orders))
            .await
            .take_json()
            .await?;

        assert_eq!(response.uuid, uuid.into_uuid());
        assert_eq!(response.status, "pending");
        assert_eq!(response.fulfillment_method, "pickup");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_other_customers_order_returns_403() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::Forbidden));

        orders.expect_create_order().never();
        orders.expect_list_own_orders().never();
        orders.expect_list_vendor_orders().never();
        orders.expect_update_status().never();

        let res = TestClient::get(format!("http://example.com/orders/{uuid}"))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_order_returns_404() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        orders.expect_create_order().never();
        orders.expect_list_own_orders().never();
        orders.expect_list_vendor_orders().never();
        orders.expect_update_status().never();

        let res = TestClient::get(format!("http://example.com/orders/{uuid}"))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
