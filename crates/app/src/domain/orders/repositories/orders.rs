//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    fulfillment::FulfillmentMethod,
    orders::{
        models::{Order, OrderUuid},
        status::OrderStatus,
    },
    profiles::{models::ProfileUuid, repository::try_get_amount},
    vendors::models::VendorUuid,
};

const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const GET_ORDER_SQL: &str = include_str!("../sql/get_order.sql");
const LIST_CUSTOMER_ORDERS_SQL: &str = include_str!("../sql/list_customer_orders.sql");
const LIST_VENDOR_ORDERS_SQL: &str = include_str!("../sql/list_vendor_orders.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("../sql/update_order_status.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert the order row. Items are inserted separately and the returned
    /// order carries an empty item list.
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        customer: ProfileUuid,
        vendor: VendorUuid,
        total: u64,
        fulfillment_method: FulfillmentMethod,
        delivery_address: Option<&str>,
    ) -> Result<Order, sqlx::Error> {
        let total_i64 = i64::try_from(total).map_err(|e| sqlx::Error::ColumnDecode {
            index: "total".to_string(),
            source: Box::new(e),
        })?;

        query_as::<Postgres, Order>(CREATE_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(customer.into_uuid())
            .bind(vendor.into_uuid())
            .bind(total_i64)
            .bind(fulfillment_method.as_str())
            .bind(delivery_address)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_customer_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: ProfileUuid,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LIST_CUSTOMER_ORDERS_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_vendor_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: VendorUuid,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LIST_VENDOR_ORDERS_SQL)
            .bind(vendor.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Compare-and-set on the status the caller validated against. Returns
    /// `None` when a concurrent writer already moved the order past `from`.
    pub(crate) async fn update_order_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<Option<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(from.as_str())
            .bind(to.as_str())
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;
        let status = OrderStatus::parse(&status).map_err(|other| sqlx::Error::ColumnDecode {
            index: "status".to_string(),
            source: format!("unknown order status {other:?}").into(),
        })?;

        let fulfillment_method: String = row.try_get("fulfillment_method")?;
        let fulfillment_method =
            FulfillmentMethod::parse(&fulfillment_method).map_err(|other| {
                sqlx::Error::ColumnDecode {
                    index: "fulfillment_method".to_string(),
                    source: format!("unknown fulfillment method {other:?}").into(),
                }
            })?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            customer_uuid: ProfileUuid::from_uuid(row.try_get("customer_uuid")?),
            vendor_uuid: VendorUuid::from_uuid(row.try_get("vendor_uuid")?),
            status,
            total: try_get_amount(row, "total")?,
            fulfillment_method,
            delivery_address: row.try_get("delivery_address")?,
            items: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
