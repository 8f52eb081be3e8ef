//! Vendor Applications Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    applications::models::{
        ApplicationStatus, ApplicationUuid, NewVendorApplication, VendorApplication,
    },
    profiles::models::ProfileUuid,
    vendors::models::VendorType,
};

const CREATE_APPLICATION_SQL: &str = include_str!("sql/create_application.sql");
const GET_APPLICATION_SQL: &str = include_str!("sql/get_application.sql");
const GET_OWN_APPLICATION_SQL: &str = include_str!("sql/get_own_application.sql");
const LIST_APPLICATIONS_SQL: &str = include_str!("sql/list_applications.sql");
const REVIEW_APPLICATION_SQL: &str = include_str!("sql/review_application.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgApplicationsRepository;

impl PgApplicationsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_application(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        applicant: ProfileUuid,
        application: &NewVendorApplication,
    ) -> Result<VendorApplication, sqlx::Error> {
        query_as::<Postgres, VendorApplication>(CREATE_APPLICATION_SQL)
            .bind(application.uuid.into_uuid())
            .bind(applicant.into_uuid())
            .bind(&application.name)
            .bind(&application.description)
            .bind(&application.location)
            .bind(application.image_url.as_deref())
            .bind(application.vendor_type.as_str())
            .bind(application.custom_business_type.as_deref())
            .bind(&application.tags)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_application(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        application: ApplicationUuid,
    ) -> Result<VendorApplication, sqlx::Error> {
        query_as::<Postgres, VendorApplication>(GET_APPLICATION_SQL)
            .bind(application.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_own_application(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        applicant: ProfileUuid,
    ) -> Result<Option<VendorApplication>, sqlx::Error> {
        query_as::<Postgres, VendorApplication>(GET_OWN_APPLICATION_SQL)
            .bind(applicant.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_applications(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<VendorApplication>, sqlx::Error> {
        query_as::<Postgres, VendorApplication>(LIST_APPLICATIONS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn review_application(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        application: ApplicationUuid,
        status: ApplicationStatus,
        rejection_reason: Option<&str>,
        reviewer: ProfileUuid,
    ) -> Result<VendorApplication, sqlx::Error> {
        query_as::<Postgres, VendorApplication>(REVIEW_APPLICATION_SQL)
            .bind(application.into_uuid())
            .bind(status.as_str())
            .bind(rejection_reason)
            .bind(reviewer.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for VendorApplication {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;
        let status =
            ApplicationStatus::parse(&status).map_err(|other| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: format!("unknown application status {other:?}").into(),
            })?;

        let vendor_type: String = row.try_get("vendor_type")?;
        let vendor_type =
            VendorType::parse(&vendor_type).map_err(|other| sqlx::Error::ColumnDecode {
                index: "vendor_type".to_string(),
                source: format!("unknown vendor type {other:?}").into(),
            })?;

        Ok(Self {
            uuid: ApplicationUuid::from_uuid(row.try_get("uuid")?),
            applicant_uuid: ProfileUuid::from_uuid(row.try_get("applicant_uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            location: row.try_get("location")?,
            image_url: row.try_get("image_url")?,
            vendor_type,
            custom_business_type: row.try_get("custom_business_type")?,
            tags: row.try_get("tags")?,
            status,
            rejection_reason: row.try_get("rejection_reason")?,
            reviewed_at: row
                .try_get::<Option<SqlxTimestamp>, _>("reviewed_at")?
                .map(SqlxTimestamp::to_jiff),
            reviewed_by: row
                .try_get::<Option<uuid::Uuid>, _>("reviewed_by")?
                .map(ProfileUuid::from_uuid),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
