//! Service Requests Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    profiles::models::ProfileUuid,
    service_requests::{
        models::{NewServiceRequest, ServiceRequest, ServiceRequestUuid},
        status::ServiceRequestStatus,
    },
    vendors::models::VendorUuid,
};

const CREATE_SERVICE_REQUEST_SQL: &str = include_str!("sql/create_service_request.sql");
const GET_SERVICE_REQUEST_SQL: &str = include_str!("sql/get_service_request.sql");
const LIST_CUSTOMER_SERVICE_REQUESTS_SQL: &str =
    include_str!("sql/list_customer_service_requests.sql");
const LIST_VENDOR_SERVICE_REQUESTS_SQL: &str =
    include_str!("sql/list_vendor_service_requests.sql");
const UPDATE_SERVICE_REQUEST_SQL: &str = include_str!("sql/update_service_request.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgServiceRequestsRepository;

impl PgServiceRequestsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_service_request(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: ProfileUuid,
        request: &NewServiceRequest,
    ) -> Result<ServiceRequest, sqlx::Error> {
        query_as::<Postgres, ServiceRequest>(CREATE_SERVICE_REQUEST_SQL)
            .bind(request.uuid.into_uuid())
            .bind(customer.into_uuid())
            .bind(request.vendor.into_uuid())
            .bind(&request.service_name)
            .bind(&request.description)
            .bind(&request.attachments)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_service_request(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        request: ServiceRequestUuid,
    ) -> Result<ServiceRequest, sqlx::Error> {
        query_as::<Postgres, ServiceRequest>(GET_SERVICE_REQUEST_SQL)
            .bind(request.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_customer_service_requests(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: ProfileUuid,
    ) -> Result<Vec<ServiceRequest>, sqlx::Error> {
        query_as::<Postgres, ServiceRequest>(LIST_CUSTOMER_SERVICE_REQUESTS_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_vendor_service_requests(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: VendorUuid,
    ) -> Result<Vec<ServiceRequest>, sqlx::Error> {
        query_as::<Postgres, ServiceRequest>(LIST_VENDOR_SERVICE_REQUESTS_SQL)
            .bind(vendor.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_service_request(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        request: ServiceRequestUuid,
        status: Option<ServiceRequestStatus>,
        quoted_price: Option<u64>,
    ) -> Result<ServiceRequest, sqlx::Error> {
        let quoted_i64 = quoted_price
            .map(i64::try_from)
            .transpose()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "quoted_price".to_string(),
                source: Box::new(e),
            })?;

        query_as::<Postgres, ServiceRequest>(UPDATE_SERVICE_REQUEST_SQL)
            .bind(request.into_uuid())
            .bind(status.map(ServiceRequestStatus::as_str))
            .bind(quoted_i64)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ServiceRequest {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;
        let status =
            ServiceRequestStatus::parse(&status).map_err(|other| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: format!("unknown service request status {other:?}").into(),
            })?;

        let quoted_price: Option<i64> = row.try_get("quoted_price")?;
        let quoted_price = quoted_price
            .map(u64::try_from)
            .transpose()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "quoted_price".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: ServiceRequestUuid::from_uuid(row.try_get("uuid")?),
            customer_uuid: ProfileUuid::from_uuid(row.try_get("customer_uuid")?),
            vendor_uuid: VendorUuid::from_uuid(row.try_get("vendor_uuid")?),
            service_name: row.try_get("service_name")?,
            description: row.try_get("description")?,
            attachments: row.try_get("attachments")?,
            status,
            quoted_price,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
