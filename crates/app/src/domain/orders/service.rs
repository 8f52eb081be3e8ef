//! Orders service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use sqlx::{Postgres, Transaction};
use tracing::info;

use crate::{
    auth::models::Principal,
    database::Db,
    domain::{
        fulfillment, loyalty,
        notifications::{
            models::NewNotification,
            push::{self, PushGateway, PushMessage},
            repository::PgNotificationsRepository,
        },
        orders::{
            errors::OrdersServiceError,
            models::{NewOrder, Order, OrderUuid},
            repositories::{items::PgOrderItemsRepository, orders::PgOrdersRepository},
            status::OrderStatus,
        },
        products::repository::PgProductsRepository,
        profiles::repository::PgProfilesRepository,
        vendors::{models::VendorUuid, repository::PgVendorsRepository},
    },
};

#[derive(Clone)]
pub struct PgOrdersService {
    db: Db,
    orders: PgOrdersRepository,
    items: PgOrderItemsRepository,
    products: PgProductsRepository,
    vendors: PgVendorsRepository,
    profiles: PgProfilesRepository,
    notifications: PgNotificationsRepository,
    push: Arc<dyn PushGateway>,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, push: Arc<dyn PushGateway>) -> Self {
        Self {
            db,
            orders: PgOrdersRepository::new(),
            items: PgOrderItemsRepository::new(),
            products: PgProductsRepository::new(),
            vendors: PgVendorsRepository::new(),
            profiles: PgProfilesRepository::new(),
            notifications: PgNotificationsRepository::new(),
            push,
        }
    }

    async fn with_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut order: Order,
    ) -> Result<Order, OrdersServiceError> {
        order.items = self.items.get_order_items(tx, order.uuid).await?;

        Ok(order)
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn create_order(
        &self,
        caller: Principal,
        new_order: NewOrder,
    ) -> Result<Order, OrdersServiceError> {
        if new_order.items.is_empty() {
            return Err(OrdersServiceError::EmptyOrder);
        }

        let mut tx = self.db.begin().await?;

        let vendor = self
            .vendors
            .get_vendor(&mut tx, new_order.vendor)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => OrdersServiceError::InvalidReference,
                error => error.into(),
            })?;

        let fulfillment = fulfillment::resolve(
            new_order.fulfillment_method,
            vendor.offers_pickup,
            vendor.offers_delivery,
            new_order.delivery_address.as_deref(),
        )?;

        let product_uuids: Vec<_> = new_order
            .items
            .iter()
            .map(|item| item.product.into_uuid())
            .collect();

        let products = self
            .products
            .get_products_by_uuids(&mut tx, &product_uuids)
            .await?;

        // Snapshot each product's current price into the line items so later
        // price changes never alter the order.
        let prices: FxHashMap<_, _> = products
            .iter()
            .map(|product| (product.uuid, product.price))
            .collect();

        let mut total: u64 = 0;
        for item in &new_order.items {
            let price = prices
                .get(&item.product)
                .copied()
                .ok_or(OrdersServiceError::InvalidReference)?;

            let line = price
                .checked_mul(u64::from(item.quantity))
                .ok_or(OrdersServiceError::InvalidData)?;

            total = total
                .checked_add(line)
                .ok_or(OrdersServiceError::InvalidData)?;
        }

        let mut order = self
            .orders
            .create_order(
                &mut tx,
                new_order.uuid,
                caller.user,
                vendor.uuid,
                total,
                fulfillment.method,
                fulfillment.delivery_address.as_deref(),
            )
            .await?;

        for item in &new_order.items {
            let price = prices.get(&item.product).copied().unwrap_or_default();

            let created = self
                .items
                .create_order_item(
                    &mut tx,
                    item.uuid,
                    order.uuid,
                    item.product,
                    item.quantity,
                    price,
                )
                .await?;

            order.items.push(created);
        }

        self.notifications
            .create_notification(
                &mut tx,
                &NewNotification {
                    recipient_uuid: vendor.owner_uuid,
                    title: "New order received".to_string(),
                    message: format!("You have a new order at {}.", vendor.name),
                    kind: "order".to_string(),
                },
            )
            .await?;

        tx.commit().await?;

        info!("created order {} for vendor {}", order.uuid, vendor.uuid);

        push::dispatch(
            Arc::clone(&self.push),
            vendor.owner_uuid,
            PushMessage {
                title: "New order received".to_string(),
                body: format!("You have a new order at {}.", vendor.name),
                url: Some(format!("/orders/{}", order.uuid)),
                tag: Some(format!("order-{}", order.uuid)),
                data: serde_json::json!({ "order_uuid": order.uuid.to_string() }),
            },
        );

        Ok(order)
    }

    async fn get_order(
        &self,
        caller: Principal,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.orders.get_order(&mut tx, order).await?;

        if order.customer_uuid != caller.user && !caller.is_admin() {
            let vendor = self.vendors.get_vendor(&mut tx, order.vendor_uuid).await?;

            if vendor.owner_uuid != caller.user {
                return Err(OrdersServiceError::Forbidden);
            }
        }

        let order = self.with_items(&mut tx, order).await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn list_own_orders(&self, caller: Principal) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.orders.list_customer_orders(&mut tx, caller.user).await?;

        let mut hydrated = Vec::with_capacity(orders.len());
        for order in orders {
            hydrated.push(self.with_items(&mut tx, order).await?);
        }

        tx.commit().await?;

        Ok(hydrated)
    }

    async fn list_vendor_orders(
        &self,
        caller: Principal,
        vendor: VendorUuid,
    ) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let vendor = self.vendors.get_vendor(&mut tx, vendor).await?;

        if vendor.owner_uuid != caller.user && !caller.is_admin() {
            return Err(OrdersServiceError::Forbidden);
        }

        let orders = self.orders.list_vendor_orders(&mut tx, vendor.uuid).await?;

        let mut hydrated = Vec::with_capacity(orders.len());
        for order in orders {
            hydrated.push(self.with_items(&mut tx, order).await?);
        }

        tx.commit().await?;

        Ok(hydrated)
    }

    async fn update_status(
        &self,
        caller: Principal,
        order: OrderUuid,
        next: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.orders.get_order(&mut tx, order).await?;

        let vendor = self.vendors.get_vendor(&mut tx, current.vendor_uuid).await?;

        // Customers may cancel their own pending order; everything else is
        // the vendor's (or an admin's) call.
        let is_customer_cancel =
            next == OrderStatus::Cancelled && current.customer_uuid == caller.user;

        if vendor.owner_uuid != caller.user && !caller.is_admin() && !is_customer_cancel {
            return Err(OrdersServiceError::Forbidden);
        }

        if !current.status.can_transition_to(next) {
            return Err(OrdersServiceError::InvalidTransition {
                from: current.status,
                to: next,
            });
        }

        // The UPDATE re-checks the status it was validated against, so two
        // concurrent transitions cannot both apply.
        let updated = self
            .orders
            .update_order_status(&mut tx, order, current.status, next)
            .await?
            .ok_or(OrdersServiceError::InvalidTransition {
                from: current.status,
                to: next,
            })?;

        if next == OrderStatus::Completed {
            let profile = self
                .profiles
                .get_profile(&mut tx, updated.customer_uuid)
                .await?;

            let points = loyalty::points_earned(updated.total, profile.total_orders);

            self.profiles
                .apply_loyalty(&mut tx, updated.customer_uuid, points)
                .await?;

            info!(
                "awarded {points} loyalty points to {} for order {}",
                updated.customer_uuid, updated.uuid
            );
        }

        self.notifications
            .create_notification(
                &mut tx,
                &NewNotification {
                    recipient_uuid: updated.customer_uuid,
                    title: "Order update".to_string(),
                    message: next.customer_message().to_string(),
                    kind: "order".to_string(),
                },
            )
            .await?;

        let updated = self.with_items(&mut tx, updated).await?;

        tx.commit().await?;

        push::dispatch(
            Arc::clone(&self.push),
            updated.customer_uuid,
            PushMessage {
                title: "Order update".to_string(),
                body: next.customer_message().to_string(),
                url: Some(format!("/orders/{}", updated.uuid)),
                tag: Some(format!("order-{}", updated.uuid)),
                data: serde_json::json!({ "order_uuid": updated.uuid.to_string(), "status": next }),
            },
        );

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Place an order for the calling customer. The total and per-item prices
    /// are frozen from the current product prices.
    async fn create_order(
        &self,
        caller: Principal,
        new_order: NewOrder,
    ) -> Result<Order, OrdersServiceError>;

    /// Retrieve one order. Visible to its customer, the vendor's owner, and
    /// admins.
    async fn get_order(
        &self,
        caller: Principal,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError>;

    /// Retrieve the caller's own orders, newest first.
    async fn list_own_orders(&self, caller: Principal) -> Result<Vec<Order>, OrdersServiceError>;

    /// Retrieve a vendor's incoming orders. Owner or admin only.
    async fn list_vendor_orders(
        &self,
        caller: Principal,
        vendor: VendorUuid,
    ) -> Result<Vec<Order>, OrdersServiceError>;

    /// Advance an order through its lifecycle. Completing an order awards
    /// loyalty points exactly once.
    async fn update_status(
        &self,
        caller: Principal,
        order: OrderUuid,
        next: OrderStatus,
    ) -> Result<Order, OrdersServiceError>;
}
