//! Service Request Models

use jiff::Timestamp;

use crate::{
    domain::{
        profiles::models::ProfileUuid, service_requests::status::ServiceRequestStatus,
        vendors::models::VendorUuid,
    },
    uuids::TypedUuid,
};

/// Service Request UUID
pub type ServiceRequestUuid = TypedUuid<ServiceRequest>;

/// Service Request Model
#[derive(Debug, Clone)]
pub struct ServiceRequest {
    pub uuid: ServiceRequestUuid,
    pub customer_uuid: ProfileUuid,
    pub vendor_uuid: VendorUuid,
    pub service_name: String,
    pub description: String,
    pub attachments: Vec<String>,
    pub status: ServiceRequestStatus,
    pub quoted_price: Option<u64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Service Request Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewServiceRequest {
    pub uuid: ServiceRequestUuid,
    pub vendor: VendorUuid,
    pub service_name: String,
    pub description: String,
    pub attachments: Vec<String>,
}

/// Update applied to a service request by its customer or vendor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceRequestUpdate {
    pub status: Option<ServiceRequestStatus>,
    pub quoted_price: Option<u64>,
}
