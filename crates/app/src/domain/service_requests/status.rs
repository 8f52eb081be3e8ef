//! Service request status state machine.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a service request.
///
/// The transition table is closed, same shape as order statuses but with an
/// `in_progress` stage instead of preparation and readiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceRequestStatus {
    Pending,
    Accepted,
    InProgress,
    Completed,
    Cancelled,
}

impl ServiceRequestStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::InProgress => "in_progress",
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
            "in_progress" => Ok(Self::InProgress),
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
                | (Self::Accepted, Self::InProgress)
                | (Self::InProgress, Self::Completed)
        )
    }

    /// Customer-facing message for a vendor-side status change.
    #[must_use]
    pub fn customer_message(self) -> &'static str {
        match self {
            Self::Pending => "Your service request has been submitted.",
            Self::Accepted => "Your service request has been accepted.",
            Self::InProgress => "Work on your service request has started.",
            Self::Completed => "Your service request is complete.",
            Self::Cancelled => "Your service request has been cancelled.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ServiceRequestStatus::*;

    #[test]
    fn happy_path_transitions_are_legal() {
        assert!(Pending.can_transition_to(Accepted));
        assert!(Accepted.can_transition_to(InProgress));
        assert!(InProgress.can_transition_to(Completed));
    }

    #[test]
    fn cancellation_only_from_pending() {
        assert!(Pending.can_transition_to(Cancelled));
        assert!(!Accepted.can_transition_to(Cancelled));
        assert!(!InProgress.can_transition_to(Cancelled));
        assert!(!Completed.can_transition_to(Cancelled));
    }

    #[test]
    fn terminal_states_have_no_exits() {
        for next in [Pending, Accepted, InProgress, Completed, Cancelled] {
            assert!(!Completed.can_transition_to(next), "completed -> {next:?}");
            assert!(!Cancelled.can_transition_to(next), "cancelled -> {next:?}");
        }
    }

    #[test]
    fn no_skipping_ahead() {
        assert!(!Pending.can_transition_to(InProgress));
        assert!(!Pending.can_transition_to(Completed));
        assert!(!Accepted.can_transition_to(Completed));
    }

    #[test]
    fn parse_round_trips() {
        for status in [Pending, Accepted, InProgress, Completed, Cancelled] {
            assert_eq!(ServiceRequestStatus::parse(status.as_str()), Ok(status));
        }

        assert!(ServiceRequestStatus::parse("scheduled").is_err());
    }
}
