//! Vendors service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::models::Principal,
    database::Db,
    domain::{
        fulfillment,
        vendors::{
            errors::VendorsServiceError,
            models::{Vendor, VendorUpdate, VendorUuid},
            repository::PgVendorsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgVendorsService {
    db: Db,
    repository: PgVendorsRepository,
}

impl PgVendorsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgVendorsRepository::new(),
        }
    }
}

#[async_trait]
impl VendorsService for PgVendorsService {
    async fn get_vendor(&self, vendor: VendorUuid) -> Result<Vendor, VendorsServiceError> {
        let mut tx = self.db.begin().await?;

        let vendor = self.repository.get_vendor(&mut tx, vendor).await?;

        tx.commit().await?;

        Ok(vendor)
    }

    async fn list_vendors(&self) -> Result<Vec<Vendor>, VendorsServiceError> {
        let mut tx = self.db.begin().await?;

        let vendors = self.repository.list_vendors(&mut tx).await?;

        tx.commit().await?;

        Ok(vendors)
    }

    async fn update_vendor(
        &self,
        caller: Principal,
        vendor: VendorUuid,
        update: VendorUpdate,
    ) -> Result<Vendor, VendorsServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.get_vendor(&mut tx, vendor).await?;

        if current.owner_uuid != caller.user && !caller.is_admin() {
            return Err(VendorsServiceError::Forbidden);
        }

        let offers_pickup = update.offers_pickup.unwrap_or(current.offers_pickup);
        let offers_delivery = update.offers_delivery.unwrap_or(current.offers_delivery);

        fulfillment::validate_offer_flags(offers_pickup, offers_delivery)?;

        let updated = self
            .repository
            .update_vendor(
                &mut tx,
                vendor,
                update.name.as_deref(),
                update.description.as_deref(),
                update.location.as_deref(),
                update.image_url.as_deref(),
                update.is_open,
                offers_pickup,
                offers_delivery,
            )
            .await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait VendorsService: Send + Sync {
    /// Retrieve a single vendor.
    async fn get_vendor(&self, vendor: VendorUuid) -> Result<Vendor, VendorsServiceError>;

    /// Retrieve all vendors, featured first.
    async fn list_vendors(&self) -> Result<Vec<Vendor>, VendorsServiceError>;

    /// Apply a partial update. Only the owner or an admin may update, and the
    /// result must keep at least one fulfillment method enabled.
    async fn update_vendor(
        &self,
        caller: Principal,
        vendor: VendorUuid,
        update: VendorUpdate,
    ) -> Result<Vendor, VendorsServiceError>;
}
