//! Request lifecycle statuses.
//!
//! The workflow vocabulary below is the authoritative one. The data layer
//! still carries a simplified legacy vocabulary (`approved`, `hr-checked`,
//! `disbursed`, `rejected`) which is accepted read-only through
//! [`RequestStatus::from_legacy`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Status of an allowance request in the review workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Being edited by the employee; not yet visible to reviewers.
    Draft,
    /// Submitted and waiting for supervisor review.
    Submitted,
    /// Approved by the supervisor; waiting for HR.
    ApprovedBySupervisor,
    /// Rejected by the supervisor.
    RejectedBySupervisor,
    /// Approved by HR; waiting for finance.
    ApprovedByHr,
    /// Rejected by HR.
    RejectedByHr,
    /// Disbursed by finance.
    Processed,
    /// Rejected by finance.
    RejectedByFinance,
    /// Closed out of the workflow.
    Archived,
}

impl RequestStatus {
    /// Every status, in workflow order.
    pub const ALL: [Self; 9] = [
        Self::Draft,
        Self::Submitted,
        Self::ApprovedBySupervisor,
        Self::RejectedBySupervisor,
        Self::ApprovedByHr,
        Self::RejectedByHr,
        Self::Processed,
        Self::RejectedByFinance,
        Self::Archived,
    ];

    /// Return the `snake_case` string representation (matches serde serialization).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::ApprovedBySupervisor => "approved_by_supervisor",
            Self::RejectedBySupervisor => "rejected_by_supervisor",
            Self::ApprovedByHr => "approved_by_hr",
            Self::RejectedByHr => "rejected_by_hr",
            Self::Processed => "processed",
            Self::RejectedByFinance => "rejected_by_finance",
            Self::Archived => "archived",
        }
    }

    /// Map a legacy persistence status onto the workflow vocabulary.
    ///
    /// Legacy `rejected` does not identify the rejecting stage and maps to
    /// `None`; callers treat that as an unknown status.
    #[must_use]
    pub fn from_legacy(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(Self::Draft),
            "submitted" => Some(Self::Submitted),
            "approved" => Some(Self::ApprovedBySupervisor),
            "hr-checked" => Some(Self::ApprovedByHr),
            "disbursed" => Some(Self::Processed),
            _ => None,
        }
    }

    /// Returns `true` for the status that closes a request's lifecycle.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Archived)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CoreError::UnknownStatus(s.to_owned()))
    }
}
