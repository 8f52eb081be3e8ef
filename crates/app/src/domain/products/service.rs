//! Products service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::models::Principal,
    database::Db,
    domain::{
        products::{
            errors::ProductsServiceError,
            models::{NewProduct, Product, ProductUpdate, ProductUuid},
            repository::PgProductsRepository,
        },
        vendors::{models::VendorUuid, repository::PgVendorsRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
    vendors_repository: PgVendorsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
            vendors_repository: PgVendorsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn list_vendor_products(
        &self,
        vendor: VendorUuid,
    ) -> Result<Vec<Product>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_vendor_products(&mut tx, vendor).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn create_product(
        &self,
        caller: Principal,
        vendor: VendorUuid,
        product: NewProduct,
    ) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let vendor_record = self
            .vendors_repository
            .get_vendor(&mut tx, vendor)
            .await
            .map_err(|_| ProductsServiceError::NotFound)?;

        if vendor_record.owner_uuid != caller.user && !caller.is_admin() {
            return Err(ProductsServiceError::Forbidden);
        }

        let created = self
            .repository
            .create_product(&mut tx, vendor, &product)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        caller: Principal,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.get_product(&mut tx, product).await?;

        let vendor = self
            .vendors_repository
            .get_vendor(&mut tx, current.vendor_uuid)
            .await?;

        if vendor.owner_uuid != caller.user && !caller.is_admin() {
            return Err(ProductsServiceError::Forbidden);
        }

        let updated = self
            .repository
            .update_product(
                &mut tx,
                product,
                update.name.as_deref(),
                update.price,
                update.is_available,
            )
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(
        &self,
        caller: Principal,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.get_product(&mut tx, product).await?;

        let vendor = self
            .vendors_repository
            .get_vendor(&mut tx, current.vendor_uuid)
            .await?;

        if vendor.owner_uuid != caller.user && !caller.is_admin() {
            return Err(ProductsServiceError::Forbidden);
        }

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieve a single live product.
    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError>;

    /// Retrieve a vendor's live products.
    async fn list_vendor_products(
        &self,
        vendor: VendorUuid,
    ) -> Result<Vec<Product>, ProductsServiceError>;

    /// Create a product in the caller's vendor catalog.
    async fn create_product(
        &self,
        caller: Principal,
        vendor: VendorUuid,
        product: NewProduct,
    ) -> Result<Product, ProductsServiceError>;

    /// Apply a partial update to a product the caller owns.
    async fn update_product(
        &self,
        caller: Principal,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError>;

    /// Soft-delete a product the caller owns.
    async fn delete_product(
        &self,
        caller: Principal,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError>;
}
