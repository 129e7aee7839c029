use serde::Deserialize;

use stipend_core::FactValue;

/// Returns the default value `true` for serde.
const fn default_true() -> bool {
    true
}

/// Top-level YAML rule file containing a list of rules.
#[derive(Debug, Deserialize)]
pub struct YamlRuleFile {
    /// The list of rules defined in this file.
    pub rules: Vec<YamlRule>,
}

/// A single allowance rule as represented in YAML.
#[derive(Debug, Deserialize)]
pub struct YamlRule {
    /// Identifier of the rule.
    pub id: String,
    /// A human-readable name for the rule.
    pub name: String,
    /// Optional description of what this rule covers.
    #[serde(default)]
    pub description: Option<String>,
    /// Priority for ordering. Higher values are evaluated first.
    #[serde(default)]
    pub priority: i32,
    /// Whether the rule is active. Defaults to `true`.
    #[serde(default = "default_true")]
    pub active: bool,
    /// The conditions a subject must satisfy.
    pub conditions: YamlConditions,
    /// The classification produced when the conditions match.
    pub outcome: YamlOutcome,
}

/// The `all` / `any` condition lists of a rule.
///
/// When a file supplies both, a non-empty `all` takes precedence and
/// `any` is ignored, matching engine semantics.
#[derive(Debug, Default, Deserialize)]
pub struct YamlConditions {
    /// Conditions that must all hold.
    #[serde(default)]
    pub all: Option<Vec<YamlCondition>>,
    /// Conditions of which at least one must hold.
    #[serde(default)]
    pub any: Option<Vec<YamlCondition>>,
}

/// A single condition as represented in YAML.
///
/// The operator is kept as a string here so unknown operators surface as
/// load-time parse errors with the offending name, not serde noise.
#[derive(Debug, Deserialize)]
pub struct YamlCondition {
    /// The subject attribute to inspect.
    pub fact: String,
    /// Name of the comparison operator.
    pub operator: String,
    /// The value to compare against.
    pub value: FactValue,
}

/// The outcome block of a YAML rule.
#[derive(Debug, Deserialize)]
pub struct YamlOutcome {
    /// The allowance group to assign.
    pub allowance_group: String,
    /// The tier to assign.
    pub tier: String,
}
