use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The roles that participate in the allowance workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Submits and owns requests.
    Employee,
    /// Reviews submissions from their department.
    Supervisor,
    /// Reviews supervisor-approved requests.
    Hr,
    /// Disburses HR-approved requests.
    Finance,
    /// Full access to every request and transition.
    Admin,
}

impl Role {
    /// Every role.
    pub const ALL: [Self; 5] = [
        Self::Employee,
        Self::Supervisor,
        Self::Hr,
        Self::Finance,
        Self::Admin,
    ];

    /// Return the lowercase string representation (matches serde serialization).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Supervisor => "supervisor",
            Self::Hr => "hr",
            Self::Finance => "finance",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| CoreError::UnknownRole(s.to_owned()))
    }
}
