use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use stipend_core::{CoreError, FactValue, Subject};

/// Comparison operators available to rule conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// Scalar equality.
    Equal,
    /// Scalar inequality.
    #[serde(alias = "notEqual")]
    NotEqual,
    /// Membership in a list; list-valued facts match on intersection.
    In,
    /// Negated membership.
    #[serde(alias = "notIn")]
    NotIn,
}

impl Operator {
    /// Return the `snake_case` string representation (matches serde serialization).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::NotEqual => "not_equal",
            Self::In => "in",
            Self::NotIn => "not_in",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "equal" => Ok(Self::Equal),
            "not_equal" | "notEqual" => Ok(Self::NotEqual),
            "in" => Ok(Self::In),
            "not_in" | "notIn" => Ok(Self::NotIn),
            other => Err(CoreError::UnknownOperator(other.to_owned())),
        }
    }
}

/// A single predicate comparing one subject fact against a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// The subject attribute to inspect.
    pub fact: String,
    /// The comparison to apply.
    pub operator: Operator,
    /// The value to compare against.
    pub value: FactValue,
}

impl Condition {
    /// Create a new condition.
    #[must_use]
    pub fn new(fact: impl Into<String>, operator: Operator, value: impl Into<FactValue>) -> Self {
        Self {
            fact: fact.into(),
            operator,
            value: value.into(),
        }
    }

    /// Evaluate this condition against a subject.
    ///
    /// A referenced fact that is absent makes the condition false for
    /// every operator, `NotEqual` and `NotIn` included.
    #[must_use]
    pub fn eval(&self, subject: &Subject) -> bool {
        let Some(actual) = subject.fact(&self.fact) else {
            return false;
        };
        match self.operator {
            Operator::Equal => equal(actual, &self.value),
            Operator::NotEqual => !equal(actual, &self.value),
            Operator::In => member(actual, &self.value),
            Operator::NotIn => !member(actual, &self.value),
        }
    }
}

/// Scalar equality; list-valued facts never compare equal.
fn equal(actual: &FactValue, expected: &FactValue) -> bool {
    match (actual, expected) {
        (FactValue::Scalar(a), FactValue::Scalar(b)) => a.equals(b),
        _ => false,
    }
}

/// Membership: the condition value must be a list. A scalar fact matches
/// when it appears in the list; a list-valued fact matches when the two
/// lists share at least one element.
fn member(actual: &FactValue, expected: &FactValue) -> bool {
    let FactValue::List(allowed) = expected else {
        return false;
    };
    match actual {
        FactValue::Scalar(s) => allowed.iter().any(|v| v.equals(s)),
        FactValue::List(held) => held
            .iter()
            .any(|h| allowed.iter().any(|v| v.equals(h))),
    }
}

/// How a rule combines its conditions.
///
/// A non-empty `all` list is evaluated and `any` is ignored; otherwise a
/// non-empty `any` list is evaluated. Empty lists never match: a rule
/// with no effective conditions matches no subject.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionSet {
    /// Conditions that must all hold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all: Option<Vec<Condition>>,
    /// Conditions of which at least one must hold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub any: Option<Vec<Condition>>,
}

impl ConditionSet {
    /// A set requiring every condition to hold.
    #[must_use]
    pub fn all(conditions: Vec<Condition>) -> Self {
        Self {
            all: Some(conditions),
            any: None,
        }
    }

    /// A set requiring at least one condition to hold.
    #[must_use]
    pub fn any(conditions: Vec<Condition>) -> Self {
        Self {
            all: None,
            any: Some(conditions),
        }
    }

    /// Evaluate the set against a subject.
    #[must_use]
    pub fn matches(&self, subject: &Subject) -> bool {
        if let Some(all) = self.all.as_deref() {
            if !all.is_empty() {
                return all.iter().all(|c| c.eval(subject));
            }
        }
        if let Some(any) = self.any.as_deref() {
            if !any.is_empty() {
                return any.iter().any(|c| c.eval(subject));
            }
        }
        false
    }
}
