use serde::{Deserialize, Serialize};

use crate::role::Role;
use crate::status::RequestStatus;
use crate::types::{Department, EmployeeId};

/// Minimal actor identity for authorization decisions.
///
/// This type is shared across crates so that callers can thread the
/// authenticated user through without depending on the full auth module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The acting user's employee identifier.
    pub id: EmployeeId,
    /// The role the actor holds for this request.
    pub role: Role,
    /// The department the actor belongs to.
    pub department: Department,
}

impl Actor {
    /// Create a new actor.
    #[must_use]
    pub fn new(
        id: impl Into<EmployeeId>,
        role: Role,
        department: impl Into<Department>,
    ) -> Self {
        Self {
            id: id.into(),
            role,
            department: department.into(),
        }
    }
}

/// The slice of a persisted allowance request the workflow engine consults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSummary {
    /// The employee the request belongs to.
    pub employee_id: EmployeeId,
    /// The department the request was filed under.
    pub department: Department,
    /// Current workflow status.
    pub status: RequestStatus,
}

impl RequestSummary {
    /// Create a new request summary.
    #[must_use]
    pub fn new(
        employee_id: impl Into<EmployeeId>,
        department: impl Into<Department>,
        status: RequestStatus,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            department: department.into(),
            status,
        }
    }
}
