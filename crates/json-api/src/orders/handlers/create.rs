//! Create Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quadmart_app::domain::{
    fulfillment::FulfillmentMethod,
    orders::models::{NewOrder, NewOrderItem},
};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

/// Create Order Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderItemRequest {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub quantity: u32,
}

impl From<CreateOrderItemRequest> for NewOrderItem {
    fn from(request: CreateOrderItemRequest) -> Self {
        NewOrderItem {
            uuid: request.uuid.into(),
            product: request.product_uuid.into(),
            quantity: request.quantity,
        }
    }
}

/// Create Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    pub uuid: Uuid,
    pub vendor_uuid: Uuid,
    /// `"pickup"` or `"delivery"`; omitted picks the vendor's default
    pub fulfillment_method: Option<String>,
    pub delivery_address: Option<String>,
    pub items: Vec<CreateOrderItemRequest>,
}

impl TryFrom<CreateOrderRequest> for NewOrder {
    type Error = StatusError;

    fn try_from(request: CreateOrderRequest) -> Result<Self, Self::Error> {
        let fulfillment_method = request
            .fulfillment_method
            .as_deref()
            .map(FulfillmentMethod::parse)
            .transpose()
            .map_err(|unknown| {
                StatusError::bad_request().brief(format!("Unknown fulfillment method: {unknown}"))
            })?;

        Ok(NewOrder {
            uuid: request.uuid.into(),
            vendor: request.vendor_uuid.into(),
            fulfillment_method,
            delivery_address: request.delivery_address,
            items: request.items.into_iter().map(Into::into).collect(),
        })
    }
}

/// Create Order Handler
///
/// Places an order; the total and per-item prices are frozen from the current
/// product prices.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::NOT_FOUND, description = "Vendor or product not found"),
        (status_code = StatusCode::CONFLICT, description = "Order already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let new_order = json.into_inner().try_into()?;

    let order = state
        .app
        .orders
        .create_order(principal, new_order)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}
