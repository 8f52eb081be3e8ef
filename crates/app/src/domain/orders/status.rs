//! Order status state machine.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a product order.
///
/// The transition table is closed: an update naming a pair not listed in
/// [`OrderStatus::can_transition_to`] is rejected outright, which also makes
/// the loyalty award on entering `completed` impossible to trigger twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Accepted,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
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
            "accepted" => Ok(Self::Accepted),
            "preparing" => Ok(Self::Preparing),
            "ready" => Ok(Self::Ready),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(other.to_string()),
        }
    }

    /// Whether `next` is a legal transition from this status.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Accepted | Self::Cancelled)
                | (Self::Accepted, Self::Preparing)
                | (Self::Preparing, Self::Ready)
                | (Self::Ready, Self::Completed)
        )
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Fixed customer-facing message for a status the vendor just set.
    #[must_use]
    pub fn customer_message(self) -> &'static str {
        match self {
            Self::Pending => "Your order has been placed.",
            Self::Accepted => "Your order has been accepted.",
            Self::Preparing => "Your order is being prepared.",
            Self::Ready => "Your order is ready for pickup or delivery.",
            Self::Completed => "Your order is complete. Enjoy!",
            Self::Cancelled => "Your order has been cancelled.",
        }
    }
}
