use thiserror::Error;

/// Errors produced at the parsing boundaries of the core types.
///
/// The decision engines themselves never error; anything malformed is
/// rejected here, before it reaches them.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A role string did not name a known role.
    #[error("unknown role: {0}")]
    UnknownRole(String),

    /// A status string did not name a known request status.
    #[error("unknown request status: {0}")]
    UnknownStatus(String),

    /// An operator string did not name a known condition operator.
    #[error("unknown operator: {0}")]
    UnknownOperator(String),
}
