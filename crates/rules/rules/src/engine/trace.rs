use serde::{Deserialize, Serialize};

use stipend_core::RuleId;

use crate::ir::rule::Rule;

/// Result of evaluating a single rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceResult {
    /// The rule's conditions matched the subject.
    Matched,
    /// The rule's conditions did not match.
    NotMatched,
    /// The rule was not evaluated because a higher-priority rule already
    /// matched.
    Skipped,
}

impl TraceResult {
    /// Return the `snake_case` string representation (matches serde serialization).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Matched => "matched",
            Self::NotMatched => "not_matched",
            Self::Skipped => "skipped",
        }
    }
}

/// Trace entry for a single rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEntry {
    /// Identifier of the rule.
    pub rule: RuleId,
    /// Name of the rule.
    pub name: String,
    /// Rule priority (higher = evaluated first).
    pub priority: i32,
    /// What happened to this rule.
    pub result: TraceResult,
}

impl TraceEntry {
    pub(crate) fn new(rule: &Rule, result: TraceResult) -> Self {
        Self {
            rule: rule.id.clone(),
            name: rule.name.clone(),
            priority: rule.priority,
            result,
        }
    }
}

/// Complete trace of one classification pass, in evaluation order.
///
/// Used by admin tooling to answer "why did this employee land in that
/// tier" without re-running the engine by hand.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluationTrace {
    /// Per-rule entries in priority order.
    pub entries: Vec<TraceEntry>,
}

impl EvaluationTrace {
    /// Identifier of the rule that matched, if any.
    #[must_use]
    pub fn matched_rule(&self) -> Option<&RuleId> {
        self.entries
            .iter()
            .find(|e| e.result == TraceResult::Matched)
            .map(|e| &e.rule)
    }

    /// Number of rules whose conditions were actually evaluated.
    #[must_use]
    pub fn evaluated_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.result != TraceResult::Skipped)
            .count()
    }

    /// Number of rules skipped after the first match.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.result == TraceResult::Skipped)
            .count()
    }
}
