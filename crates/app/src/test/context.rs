//! Test context for service-level integration tests.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    auth::models::Principal,
    database::Db,
    domain::{
        applications::PgApplicationsService,
        notifications::{
            PgNotificationsService, PushGateway, PushMessage,
            models::{NewNotification, Notification},
            push::PushError,
            repository::PgNotificationsRepository,
        },
        orders::PgOrdersService,
        products::{
            PgProductsService,
            models::{NewProduct, Product, ProductUuid},
            repository::PgProductsRepository,
        },
        profiles::{PgProfilesService, models::ProfileUuid, models::Role},
        rewards::{
            PgRewardsService,
            models::{Reward, RewardUuid},
        },
        service_requests::PgServiceRequestsService,
        vendors::{
            PgVendorsService,
            models::{NewVendor, Vendor, VendorType, VendorUuid},
            repository::PgVendorsRepository,
        },
        wallet::{PaymentGateway, PgWalletService, checkout::CheckoutError},
    },
};

use super::db::TestDb;

/// Push gateway that drops every send. Push delivery is best effort, so the
/// domain flows under test never depend on it.
struct NullPushGateway;

#[async_trait]
impl PushGateway for NullPushGateway {
    async fn push_to_user(
        &self,
        _user: ProfileUuid,
        _message: &PushMessage,
    ) -> Result<(), PushError> {
        Ok(())
    }
}

/// Payment gateway that hands back a canned checkout URL without any HTTP.
struct StubPaymentGateway;

#[async_trait]
impl PaymentGateway for StubPaymentGateway {
    async fn create_checkout_session(
        &self,
        profile: ProfileUuid,
        amount: u64,
    ) -> Result<String, CheckoutError> {
        Ok(format!(
            "https://checkout.test/session?profile={profile}&amount={amount}"
        ))
    }
}

pub struct TestContext {
    pub db: TestDb,
    pub profiles: PgProfilesService,
    pub vendors: PgVendorsService,
    pub products: PgProductsService,
    pub orders: PgOrdersService,
    pub service_requests: PgServiceRequestsService,
    pub applications: PgApplicationsService,
    pub rewards: PgRewardsService,
    pub wallet: PgWalletService,
    pub notifications: PgNotificationsService,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        let push: Arc<dyn PushGateway> = Arc::new(NullPushGateway);

        Self {
            profiles: PgProfilesService::new(db.clone()),
            vendors: PgVendorsService::new(db.clone()),
            products: PgProductsService::new(db.clone()),
            orders: PgOrdersService::new(db.clone(), Arc::clone(&push)),
            service_requests: PgServiceRequestsService::new(db.clone(), push),
            applications: PgApplicationsService::new(db.clone()),
            rewards: PgRewardsService::new(db.clone()),
            wallet: PgWalletService::new(db.clone(), Arc::new(StubPaymentGateway)),
            notifications: PgNotificationsService::new(db),
            db: test_db,
        }
    }

    /// A `Db` handle on the test database, for wiring services directly.
    pub fn db_handle(&self) -> Db {
        Db::new(self.db.pool().clone())
    }

    pub fn member_principal(&self, user: ProfileUuid) -> Principal {
        Principal {
            user,
            role: Role::Member,
        }
    }

    pub fn admin_principal(&self, user: ProfileUuid) -> Principal {
        Principal {
            user,
            role: Role::Admin,
        }
    }

    /// Insert a member profile and return its uuid.
    pub async fn create_user(&self) -> Result<ProfileUuid, sqlx::Error> {
        let uuid = Uuid::now_v7();

        sqlx::query("INSERT INTO profiles (uuid) VALUES ($1)")
            .bind(uuid)
            .execute(self.db.pool())
            .await?;

        Ok(ProfileUuid::from_uuid(uuid))
    }

    /// Insert an admin profile and return its uuid.
    pub async fn create_admin(&self) -> Result<ProfileUuid, sqlx::Error> {
        let uuid = Uuid::now_v7();

        sqlx::query("INSERT INTO profiles (uuid, role) VALUES ($1, 'admin')")
            .bind(uuid)
            .execute(self.db.pool())
            .await?;

        Ok(ProfileUuid::from_uuid(uuid))
    }

    /// Insert a pickup-only product vendor owned by `owner`.
    pub async fn create_vendor(&self, owner: ProfileUuid) -> Result<Vendor, sqlx::Error> {
        self.insert_vendor(owner, VendorType::Product).await
    }

    /// Insert a pickup-only service vendor owned by `owner`.
    pub async fn create_service_vendor(&self, owner: ProfileUuid) -> Result<Vendor, sqlx::Error> {
        self.insert_vendor(owner, VendorType::Service).await
    }

    async fn insert_vendor(
        &self,
        owner: ProfileUuid,
        vendor_type: VendorType,
    ) -> Result<Vendor, sqlx::Error> {
        let mut tx = self.db_handle().begin().await?;

        let vendor = PgVendorsRepository::new()
            .create_vendor(
                &mut tx,
                &NewVendor {
                    uuid: VendorUuid::new(),
                    owner_uuid: owner,
                    name: "Test Vendor".to_string(),
                    description: "A vendor for tests.".to_string(),
                    location: "Student union".to_string(),
                    image_url: None,
                    vendor_type,
                    custom_business_type: None,
                    tags: vec![],
                },
            )
            .await?;

        tx.commit().await?;

        Ok(vendor)
    }

    /// Insert an available product for `vendor`.
    pub async fn create_product(
        &self,
        vendor: VendorUuid,
        name: &str,
        price: u64,
    ) -> Result<Product, sqlx::Error> {
        let mut tx = self.db_handle().begin().await?;

        let product = PgProductsRepository::new()
            .create_product(
                &mut tx,
                vendor,
                &NewProduct {
                    uuid: ProductUuid::new(),
                    name: name.to_string(),
                    price,
                },
            )
            .await?;

        tx.commit().await?;

        Ok(product)
    }

    /// Overwrite a product's price directly, bypassing ownership checks.
    pub async fn set_product_price(
        &self,
        product: ProductUuid,
        price: u64,
    ) -> Result<(), sqlx::Error> {
        let price_i64 = i64::try_from(price).expect("price fits in BIGINT");

        sqlx::query("UPDATE products SET price = $2, updated_at = now() WHERE uuid = $1")
            .bind(product.into_uuid())
            .bind(price_i64)
            .execute(self.db.pool())
            .await?;

        Ok(())
    }

    /// Insert a notification row directly.
    pub async fn create_notification(
        &self,
        notification: &NewNotification,
    ) -> Result<Notification, sqlx::Error> {
        let mut tx = self.db_handle().begin().await?;

        let created = PgNotificationsRepository::new()
            .create_notification(&mut tx, notification)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    /// Insert an active reward.
    pub async fn create_reward(&self, name: &str, points: u64) -> Result<Reward, sqlx::Error> {
        self.insert_reward(name, points, true).await
    }

    /// Insert a reward that is no longer redeemable.
    pub async fn create_inactive_reward(
        &self,
        name: &str,
        points: u64,
    ) -> Result<Reward, sqlx::Error> {
        self.insert_reward(name, points, false).await
    }

    async fn insert_reward(
        &self,
        name: &str,
        points: u64,
        is_active: bool,
    ) -> Result<Reward, sqlx::Error> {
        let uuid = RewardUuid::new();
        let points_i64 = i64::try_from(points).expect("points fit in BIGINT");

        sqlx::query(
            "INSERT INTO rewards (uuid, name, description, points_required, is_active) \
             VALUES ($1, $2, '', $3, $4)",
        )
        .bind(uuid.into_uuid())
        .bind(name)
        .bind(points_i64)
        .bind(is_active)
        .execute(self.db.pool())
        .await?;

        Ok(Reward {
            uuid,
            name: name.to_string(),
            description: String::new(),
            points_required: points,
            is_active,
            created_at: jiff::Timestamp::now(),
        })
    }

    /// Grant loyalty points to a profile directly.
    pub async fn grant_points(&self, user: ProfileUuid, points: u64) -> Result<(), sqlx::Error> {
        let points_i64 = i64::try_from(points).expect("points fit in BIGINT");

        sqlx::query(
            "UPDATE profiles SET loyalty_points = loyalty_points + $2, updated_at = now() \
             WHERE uuid = $1",
        )
        .bind(user.into_uuid())
        .bind(points_i64)
        .execute(self.db.pool())
        .await?;

        Ok(())
    }
}
