use thiserror::Error;

/// Errors that can occur while loading rules from a frontend.
///
/// Evaluation itself is infallible: malformed conditions and absent facts
/// resolve to non-matches, never to errors.
#[derive(Debug, Error)]
pub enum RuleError {
    /// A parse error when loading rules from a frontend.
    #[error("parse error: {0}")]
    Parse(String),
}
