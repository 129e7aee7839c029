//! Role-scoped workflow transition table.
//!
//! The table answers whether a transition is structurally permitted for a
//! role. Ownership and department checks (an employee may only submit
//! their own draft) are layered on by the caller.

use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use stipend_core::{RequestStatus, Role};

/// One legal (role, from, to) edge in the request workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRule {
    /// The role permitted to perform the transition.
    pub role: Role,
    /// Source status.
    pub from: RequestStatus,
    /// Target status.
    pub to: RequestStatus,
}

impl TransitionRule {
    /// Create a new transition rule.
    #[must_use]
    pub fn new(role: Role, from: RequestStatus, to: RequestStatus) -> Self {
        Self { role, from, to }
    }
}

/// The transition table governing workflow legality.
///
/// Read-only at steady state; build it once per process (or use the
/// module-level [`can_transition`], which consults the standard table).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransitionTable {
    transitions: Vec<TransitionRule>,
}

impl TransitionTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a transition, ignoring exact duplicates.
    #[must_use]
    pub fn with_transition(mut self, role: Role, from: RequestStatus, to: RequestStatus) -> Self {
        let rule = TransitionRule::new(role, from, to);
        if !self.transitions.contains(&rule) {
            self.transitions.push(rule);
        }
        self
    }

    /// The standard allowance-request workflow.
    ///
    /// Admin holds every transition of the other roles, may re-open any
    /// rejection back to `submitted`, and may archive from any
    /// non-archived status.
    #[must_use]
    pub fn standard() -> Self {
        use RequestStatus::{
            ApprovedByHr, ApprovedBySupervisor, Archived, Draft, Processed, RejectedByFinance,
            RejectedByHr, RejectedBySupervisor, Submitted,
        };

        let mut table = Self::new()
            .with_transition(Role::Employee, Draft, Submitted)
            .with_transition(Role::Employee, Draft, Archived)
            .with_transition(Role::Supervisor, Submitted, ApprovedBySupervisor)
            .with_transition(Role::Supervisor, Submitted, RejectedBySupervisor)
            .with_transition(Role::Hr, ApprovedBySupervisor, ApprovedByHr)
            .with_transition(Role::Hr, ApprovedBySupervisor, RejectedByHr)
            .with_transition(Role::Hr, RejectedBySupervisor, Archived)
            .with_transition(Role::Finance, ApprovedByHr, Processed)
            .with_transition(Role::Finance, ApprovedByHr, RejectedByFinance)
            .with_transition(Role::Finance, RejectedByHr, Archived);

        let inherited: Vec<TransitionRule> = table.transitions.clone();
        for rule in inherited {
            table = table.with_transition(Role::Admin, rule.from, rule.to);
        }
        for rejected in [RejectedBySupervisor, RejectedByHr, RejectedByFinance] {
            table = table.with_transition(Role::Admin, rejected, Submitted);
        }
        for status in RequestStatus::ALL {
            if status != Archived {
                table = table.with_transition(Role::Admin, status, Archived);
            }
        }
        table
    }

    /// Check whether the table permits `role` to move a request from
    /// `from` to `to`.
    #[must_use]
    pub fn allows(&self, role: Role, from: RequestStatus, to: RequestStatus) -> bool {
        self.transitions
            .iter()
            .any(|t| t.role == role && t.from == from && t.to == to)
    }

    /// The statuses `role` may move a request in `from` to.
    #[must_use]
    pub fn allowed_targets(&self, role: Role, from: RequestStatus) -> Vec<RequestStatus> {
        self.transitions
            .iter()
            .filter(|t| t.role == role && t.from == from)
            .map(|t| t.to)
            .collect()
    }

    /// All transitions in the table.
    #[must_use]
    pub fn transitions(&self) -> &[TransitionRule] {
        &self.transitions
    }
}

static STANDARD: LazyLock<TransitionTable> = LazyLock::new(TransitionTable::standard);

/// Check a transition against the process-wide standard table.
#[must_use]
pub fn can_transition(role: Role, from: RequestStatus, to: RequestStatus) -> bool {
    STANDARD.allows(role, from, to)
}

/// String boundary for [`can_transition`].
///
/// Unknown roles and statuses resolve to `false`, never an error. Legacy
/// status names are accepted where they map onto the workflow vocabulary;
/// the ambiguous legacy `rejected` does not, and so always denies.
#[must_use]
pub fn can_transition_str(role: &str, from: &str, to: &str) -> bool {
    let Ok(role) = Role::from_str(role) else {
        debug!(role, "unknown role, denying transition");
        return false;
    };
    let (Some(from), Some(to)) = (parse_status(from), parse_status(to)) else {
        debug!(from, to, "unknown status, denying transition");
        return false;
    };
    can_transition(role, from, to)
}

fn parse_status(value: &str) -> Option<RequestStatus> {
    value
        .parse()
        .ok()
        .or_else(|| RequestStatus::from_legacy(value))
}
