//! Vendor Application Models

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{profiles::models::ProfileUuid, vendors::models::VendorType},
    uuids::TypedUuid,
};

/// Vendor Application UUID
pub type ApplicationUuid = TypedUuid<VendorApplication>;

/// Review outcome of a vendor application. Both review states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parse a stored status string.
    ///
    /// # Errors
    ///
    /// Returns the unrecognised value.
    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(other.to_string()),
        }
    }
}

/// Vendor Application Model
#[derive(Debug, Clone)]
pub struct VendorApplication {
    pub uuid: ApplicationUuid,
    pub applicant_uuid: ProfileUuid,
    pub name: String,
    pub description: String,
    pub location: String,
    pub image_url: Option<String>,
    pub vendor_type: VendorType,
    pub custom_business_type: Option<String>,
    pub tags: Vec<String>,
    pub status: ApplicationStatus,
    pub rejection_reason: Option<String>,
    pub reviewed_at: Option<Timestamp>,
    pub reviewed_by: Option<ProfileUuid>,
    pub created_at: Timestamp,
}

/// New Vendor Application Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewVendorApplication {
    pub uuid: ApplicationUuid,
    pub name: String,
    pub description: String,
    pub location: String,
    pub image_url: Option<String>,
    pub vendor_type: VendorType,
    pub custom_business_type: Option<String>,
    pub tags: Vec<String>,
}
