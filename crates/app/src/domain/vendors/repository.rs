//! Vendors Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    profiles::models::ProfileUuid,
    vendors::models::{NewVendor, Vendor, VendorType, VendorUuid},
};

const GET_VENDOR_SQL: &str = include_str!("sql/get_vendor.sql");
const LIST_VENDORS_SQL: &str = include_str!("sql/list_vendors.sql");
const CREATE_VENDOR_SQL: &str = include_str!("sql/create_vendor.sql");
const UPDATE_VENDOR_SQL: &str = include_str!("sql/update_vendor.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgVendorsRepository;

impl PgVendorsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_vendor(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: VendorUuid,
    ) -> Result<Vendor, sqlx::Error> {
        query_as::<Postgres, Vendor>(GET_VENDOR_SQL)
            .bind(vendor.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_vendors(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Vendor>, sqlx::Error> {
        query_as::<Postgres, Vendor>(LIST_VENDORS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_vendor(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: &NewVendor,
    ) -> Result<Vendor, sqlx::Error> {
        query_as::<Postgres, Vendor>(CREATE_VENDOR_SQL)
            .bind(vendor.uuid.into_uuid())
            .bind(vendor.owner_uuid.into_uuid())
            .bind(&vendor.name)
            .bind(&vendor.description)
            .bind(&vendor.location)
            .bind(vendor.image_url.as_deref())
            .bind(vendor.vendor_type.as_str())
            .bind(vendor.custom_business_type.as_deref())
            .bind(&vendor.tags)
            .fetch_one(&mut **tx)
            .await
    }

    /// Apply a partial update. The fulfillment flags are always written with
    /// their already-resolved values; the caller validates them first.
    #[expect(clippy::too_many_arguments, reason = "one bind per updatable column")]
    pub(crate) async fn update_vendor(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: VendorUuid,
        name: Option<&str>,
        description: Option<&str>,
        location: Option<&str>,
        image_url: Option<&str>,
        is_open: Option<bool>,
        offers_pickup: bool,
        offers_delivery: bool,
    ) -> Result<Vendor, sqlx::Error> {
        query_as::<Postgres, Vendor>(UPDATE_VENDOR_SQL)
            .bind(vendor.into_uuid())
            .bind(name)
            .bind(description)
            .bind(location)
            .bind(image_url)
            .bind(is_open)
            .bind(offers_pickup)
            .bind(offers_delivery)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Vendor {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let vendor_type: String = row.try_get("vendor_type")?;

        let vendor_type =
            VendorType::parse(&vendor_type).map_err(|value| sqlx::Error::ColumnDecode {
                index: "vendor_type".to_string(),
                source: format!("unknown vendor type: {value}").into(),
            })?;

        Ok(Self {
            uuid: VendorUuid::from_uuid(row.try_get("uuid")?),
            owner_uuid: ProfileUuid::from_uuid(row.try_get("owner_uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            location: row.try_get("location")?,
            image_url: row.try_get("image_url")?,
            vendor_type,
            custom_business_type: row.try_get("custom_business_type")?,
            tags: row.try_get("tags")?,
            is_open: row.try_get("is_open")?,
            is_featured: row.try_get("is_featured")?,
            offers_pickup: row.try_get("offers_pickup")?,
            offers_delivery: row.try_get("offers_delivery")?,
            rating: row.try_get("rating")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
