//! Profile Models

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{domain::loyalty::Tier, uuids::TypedUuid};

/// Profile UUID — equal to the identity provider's stable user id.
pub type ProfileUuid = TypedUuid<Profile>;

/// Platform role attached to a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Member,
    Vendor,
    Admin,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Vendor => "vendor",
            Self::Admin => "admin",
        }
    }

    /// Parse a stored role string.
    ///
    /// # Errors
    ///
    /// Returns the unrecognised value.
    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "member" => Ok(Self::Member),
            "vendor" => Ok(Self::Vendor),
            "admin" => Ok(Self::Admin),
            other => Err(other.to_string()),
        }
    }
}

/// Profile Model
#[derive(Debug, Clone)]
pub struct Profile {
    pub uuid: ProfileUuid,
    pub role: Role,
    pub wallet_balance: u64,
    pub loyalty_points: u64,
    pub total_orders: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Profile {
    /// Loyalty tier derived from the current completed order count.
    ///
    /// Display-only; never stored.
    #[must_use]
    pub fn tier(&self) -> Tier {
        Tier::for_total_orders(self.total_orders)
    }
}
