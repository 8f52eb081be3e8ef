//! Vendor Models

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{domain::profiles::models::ProfileUuid, uuids::TypedUuid};

/// Vendor UUID
pub type VendorUuid = TypedUuid<Vendor>;

/// What a vendor sells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VendorType {
    Product,
    Service,
}

impl VendorType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Service => "service",
        }
    }

    /// Parse a stored vendor type string.
    ///
    /// # Errors
    ///
    /// Returns the unrecognised value.
    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "product" => Ok(Self::Product),
            "service" => Ok(Self::Service),
            other => Err(other.to_string()),
        }
    }
}

/// Vendor Model
#[derive(Debug, Clone)]
pub struct Vendor {
    pub uuid: VendorUuid,
    pub owner_uuid: ProfileUuid,
    pub name: String,
    pub description: String,
    pub location: String,
    pub image_url: Option<String>,
    pub vendor_type: VendorType,
    pub custom_business_type: Option<String>,
    pub tags: Vec<String>,
    pub is_open: bool,
    pub is_featured: bool,
    pub offers_pickup: bool,
    pub offers_delivery: bool,
    pub rating: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Vendor Model — created only by approving a vendor application.
#[derive(Debug, Clone)]
pub struct NewVendor {
    pub uuid: VendorUuid,
    pub owner_uuid: ProfileUuid,
    pub name: String,
    pub description: String,
    pub location: String,
    pub image_url: Option<String>,
    pub vendor_type: VendorType,
    pub custom_business_type: Option<String>,
    pub tags: Vec<String>,
}

/// Vendor Update Model — absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VendorUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub is_open: Option<bool>,
    pub offers_pickup: Option<bool>,
    pub offers_delivery: Option<bool>,
}
