//! Subject attribute values for rule evaluation.
//!
//! A subject is the entity rules are evaluated against, typically an
//! employee. Its attributes ("facts") are scalars or lists of scalars;
//! anything the persistence layer did not supply is simply absent, and
//! conditions referencing absent facts fail closed.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single scalar fact value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// A boolean value.
    Bool(bool),
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit floating-point number.
    Float(f64),
    /// A UTF-8 string.
    String(String),
}

impl Scalar {
    /// Check equality of two scalars, with type coercion for int/float.
    ///
    /// Cross-type comparisons other than int/float are always unequal.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn equals(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => (a - b).abs() < f64::EPSILON,
            (Self::Int(a), Self::Float(b)) | (Self::Float(b), Self::Int(a)) => {
                (*a as f64 - b).abs() < f64::EPSILON
            }
            (Self::String(a), Self::String(b)) => a == b,
            _ => false,
        }
    }

    /// Returns a string representation of the value type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
        }
    }

    /// Convert a `serde_json::Value` into a scalar, if it is one.
    #[must_use]
    pub fn from_json(json: &serde_json::Value) -> Option<Self> {
        match json {
            serde_json::Value::Bool(b) => Some(Self::Bool(*b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Self::Int(i))
                } else {
                    n.as_f64().map(Self::Float)
                }
            }
            serde_json::Value::String(s) => Some(Self::String(s.clone())),
            _ => None,
        }
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for Scalar {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

/// A fact value: a scalar or a list of scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FactValue {
    /// A single scalar value.
    Scalar(Scalar),
    /// An ordered list of scalar values.
    List(Vec<Scalar>),
}

impl FactValue {
    /// Convert a `serde_json::Value` into a fact value.
    ///
    /// Returns `None` for `null` and for shapes a fact cannot hold
    /// (nested objects). List entries that are not scalars are dropped.
    #[must_use]
    pub fn from_json(json: &serde_json::Value) -> Option<Self> {
        match json {
            serde_json::Value::Array(items) => {
                Some(Self::List(items.iter().filter_map(Scalar::from_json).collect()))
            }
            other => Scalar::from_json(other).map(Self::Scalar),
        }
    }

    /// Returns the scalar value, if this fact holds one.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::List(_) => None,
        }
    }

    /// Returns the list of scalars, if this fact holds one.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Scalar]> {
        match self {
            Self::Scalar(_) => None,
            Self::List(items) => Some(items),
        }
    }
}

impl From<Scalar> for FactValue {
    fn from(scalar: Scalar) -> Self {
        Self::Scalar(scalar)
    }
}

impl From<bool> for FactValue {
    fn from(b: bool) -> Self {
        Self::Scalar(Scalar::Bool(b))
    }
}

impl From<i64> for FactValue {
    fn from(n: i64) -> Self {
        Self::Scalar(Scalar::Int(n))
    }
}

impl From<f64> for FactValue {
    fn from(f: f64) -> Self {
        Self::Scalar(Scalar::Float(f))
    }
}

impl From<&str> for FactValue {
    fn from(s: &str) -> Self {
        Self::Scalar(Scalar::String(s.to_owned()))
    }
}

impl From<String> for FactValue {
    fn from(s: String) -> Self {
        Self::Scalar(Scalar::String(s))
    }
}

impl From<Vec<Scalar>> for FactValue {
    fn from(items: Vec<Scalar>) -> Self {
        Self::List(items)
    }
}

impl From<Vec<&str>> for FactValue {
    fn from(items: Vec<&str>) -> Self {
        Self::List(items.into_iter().map(Scalar::from).collect())
    }
}

/// The attribute map rules are evaluated against.
///
/// Partial by design: only facts referenced by at least one rule need to
/// be present. JSON `null`s are dropped on conversion so "present as
/// null" and "absent" behave identically during evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Subject {
    facts: HashMap<String, FactValue>,
}

impl Subject {
    /// Create an empty subject.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fact, consuming and returning the subject.
    #[must_use]
    pub fn with_fact(mut self, name: impl Into<String>, value: impl Into<FactValue>) -> Self {
        self.facts.insert(name.into(), value.into());
        self
    }

    /// Insert or replace a fact.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FactValue>) {
        self.facts.insert(name.into(), value.into());
    }

    /// Look up a fact by name.
    #[must_use]
    pub fn fact(&self, name: &str) -> Option<&FactValue> {
        self.facts.get(name)
    }

    /// Build a subject from a JSON object as handed over by persistence.
    ///
    /// Non-object values yield an empty subject. Keys whose values cannot
    /// be represented as facts (nulls, nested objects) are dropped.
    #[must_use]
    pub fn from_json(json: &serde_json::Value) -> Self {
        let mut subject = Self::new();
        if let serde_json::Value::Object(map) = json {
            for (key, value) in map {
                if let Some(fact) = FactValue::from_json(value) {
                    subject.facts.insert(key.clone(), fact);
                }
            }
        }
        subject
    }

    /// Number of facts present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Returns `true` when the subject carries no facts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_equality_coerces_numbers() {
        assert!(Scalar::Int(1).equals(&Scalar::Float(1.0)));
        assert!(Scalar::Float(2.0).equals(&Scalar::Int(2)));
        assert!(!Scalar::Int(1).equals(&Scalar::Float(1.5)));
    }

    #[test]
    fn scalar_equality_rejects_cross_type() {
        assert!(!Scalar::from("1").equals(&Scalar::Int(1)));
        assert!(!Scalar::Bool(true).equals(&Scalar::Int(1)));
    }

    #[test]
    fn scalar_from_json() {
        assert_eq!(
            Scalar::from_json(&serde_json::json!("Nurse")),
            Some(Scalar::String("Nurse".into()))
        );
        assert_eq!(Scalar::from_json(&serde_json::json!(3)), Some(Scalar::Int(3)));
        assert_eq!(Scalar::from_json(&serde_json::Value::Null), None);
        assert_eq!(Scalar::from_json(&serde_json::json!([1, 2])), None);
    }

    #[test]
    fn fact_value_from_json_list() {
        let value = FactValue::from_json(&serde_json::json!(["a", "b"])).unwrap();
        assert_eq!(value.as_list().unwrap().len(), 2);
    }

    #[test]
    fn fact_value_from_json_drops_non_scalar_entries() {
        let value = FactValue::from_json(&serde_json::json!(["a", null, {"x": 1}])).unwrap();
        assert_eq!(value.as_list().unwrap(), &[Scalar::String("a".into())]);
    }

    #[test]
    fn subject_from_json_drops_nulls() {
        let subject = Subject::from_json(&serde_json::json!({
            "position": "Nurse",
            "department": null,
            "certifications": ["ICU Certified"],
        }));
        assert!(subject.fact("position").is_some());
        assert!(subject.fact("department").is_none());
        assert_eq!(subject.len(), 2);
    }

    #[test]
    fn subject_from_non_object_is_empty() {
        assert!(Subject::from_json(&serde_json::json!("nope")).is_empty());
        assert!(Subject::from_json(&serde_json::Value::Null).is_empty());
    }

    #[test]
    fn subject_builder() {
        let subject = Subject::new()
            .with_fact("position", "Nurse")
            .with_fact("years_of_service", 7_i64);
        assert_eq!(
            subject.fact("position").and_then(FactValue::as_scalar),
            Some(&Scalar::String("Nurse".into()))
        );
        assert!(subject.fact("missing").is_none());
    }

    #[test]
    fn fact_value_serde_untagged() {
        let scalar: FactValue = serde_json::from_str("\"Nurse\"").unwrap();
        assert!(scalar.as_scalar().is_some());

        let list: FactValue = serde_json::from_str("[\"a\", \"b\"]").unwrap();
        assert!(list.as_list().is_some());

        let json = serde_json::to_string(&FactValue::from(vec!["a", "b"])).unwrap();
        assert_eq!(json, "[\"a\",\"b\"]");
    }
}
