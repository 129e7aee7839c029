use serde::{Deserialize, Serialize};

use crate::types::{AllowanceGroup, RuleId, Tier};

/// The allowance classification a matching rule produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// The allowance group the subject falls into.
    #[serde(alias = "allowanceGroup")]
    pub allowance_group: AllowanceGroup,
    /// The tier within that group.
    pub tier: Tier,
}

impl Outcome {
    /// Create a new outcome.
    #[must_use]
    pub fn new(allowance_group: impl Into<AllowanceGroup>, tier: impl Into<Tier>) -> Self {
        Self {
            allowance_group: allowance_group.into(),
            tier: tier.into(),
        }
    }
}

/// What classification hands back to callers.
///
/// When no rule matched, both fields serialize as JSON `null` so the
/// caller sees an empty classification rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// The assigned allowance group, if any rule matched.
    #[serde(alias = "allowanceGroup")]
    pub allowance_group: Option<AllowanceGroup>,
    /// The assigned tier, if any rule matched.
    pub tier: Option<Tier>,
    /// The rule that produced the match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<RuleId>,
}

impl Classification {
    /// A classification carrying the matched rule's outcome.
    #[must_use]
    pub fn matched(rule: RuleId, outcome: Outcome) -> Self {
        Self {
            allowance_group: Some(outcome.allowance_group),
            tier: Some(outcome.tier),
            rule: Some(rule),
        }
    }

    /// The null classification returned when no rule matched.
    #[must_use]
    pub fn unmatched() -> Self {
        Self::default()
    }

    /// Returns `true` when a rule matched.
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.allowance_group.is_some() && self.tier.is_some()
    }

    /// The matched outcome, when there is one.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        match (&self.allowance_group, &self.tier) {
            (Some(group), Some(tier)) => Some(Outcome {
                allowance_group: group.clone(),
                tier: tier.clone(),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmatched_serializes_as_nulls() {
        let json = serde_json::to_value(Classification::unmatched()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "allowance_group": null, "tier": null })
        );
    }

    #[test]
    fn matched_carries_rule_and_outcome() {
        let classification =
            Classification::matched(RuleId::new("nurse-icu"), Outcome::new("Nurse", "3"));
        assert!(classification.is_match());
        assert_eq!(classification.rule.as_ref().unwrap().as_str(), "nurse-icu");
        assert_eq!(
            classification.outcome().unwrap(),
            Outcome::new("Nurse", "3")
        );
    }

    #[test]
    fn outcome_accepts_camel_case_input() {
        let outcome: Outcome =
            serde_json::from_str(r#"{"allowanceGroup": "Nurse", "tier": "2"}"#).unwrap();
        assert_eq!(outcome, Outcome::new("Nurse", "2"));
    }
}
