//! Loyalty points and tier calculation.
//!
//! Points are a pure function of the completed order total and the number of
//! orders the customer had completed before it. Tiers are derived from the
//! current order count on read and never stored.

use serde::Serialize;

/// Loyalty tier, derived from a customer's completed order count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Member,
    Bronze,
    Silver,
    Gold,
}

impl Tier {
    /// Tier for a customer with the given number of completed orders.
    #[must_use]
    pub fn for_total_orders(total_orders: u64) -> Self {
        match total_orders {
            50.. => Self::Gold,
            20.. => Self::Silver,
            5.. => Self::Bronze,
            _ => Self::Member,
        }
    }

    /// Point multiplier as an exact rational (numerator, denominator).
    ///
    /// Gold 1.5, silver 1.25, bronze 1.1, member 1.0.
    #[must_use]
    pub fn multiplier(self) -> (u64, u64) {
        match self {
            Self::Gold => (3, 2),
            Self::Silver => (5, 4),
            Self::Bronze => (11, 10),
            Self::Member => (1, 1),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gold => "gold",
            Self::Silver => "silver",
            Self::Bronze => "bronze",
            Self::Member => "member",
        }
    }
}

/// Points earned for a completed order.
///
/// `total_cents` is the frozen order total in cents; `prior_orders` is the
/// customer's completed order count before this one. Base points are one per
/// two currency units (floored), then scaled by the tier multiplier (floored).
#[must_use]
pub fn points_earned(total_cents: u64, prior_orders: u64) -> u64 {
    let base_points = total_cents / 200;
    let (num, den) = Tier::for_total_orders(prior_orders).multiplier();

    base_points * num / den
}
