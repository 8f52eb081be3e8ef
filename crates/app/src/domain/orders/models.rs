//! Order Models

use jiff::Timestamp;

use crate::{
    domain::{
        fulfillment::FulfillmentMethod, orders::status::OrderStatus,
        products::models::ProductUuid, profiles::models::ProfileUuid,
        vendors::models::VendorUuid,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItem>;

/// Order Model
#[derive(Debug, Clone)]
pub struct Order {
    pub uuid: OrderUuid,
    pub customer_uuid: ProfileUuid,
    pub vendor_uuid: VendorUuid,
    pub status: OrderStatus,
    /// Frozen at creation: the sum of `price_at_time * quantity` over items.
    pub total: u64,
    pub fulfillment_method: FulfillmentMethod,
    pub delivery_address: Option<String>,
    pub items: Vec<OrderItem>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Order line item — a snapshot of the product price at order time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub uuid: OrderItemUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub price_at_time: u64,
}

/// New Order Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub vendor: VendorUuid,
    pub fulfillment_method: Option<FulfillmentMethod>,
    pub delivery_address: Option<String>,
    pub items: Vec<NewOrderItem>,
}

/// New Order Item Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub uuid: OrderItemUuid,
    pub product: ProductUuid,
    pub quantity: u32,
}
