use serde::{Deserialize, Serialize};

use stipend_core::{Outcome, RuleId, Subject};

use super::condition::ConditionSet;

/// Where a rule was loaded from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleSource {
    /// Loaded from a YAML file.
    Yaml {
        /// The file path, if available.
        file: Option<String>,
    },
    /// Created via API.
    Api,
    /// Defined inline in code.
    Inline,
}

/// A single allowance rule combining conditions with an outcome.
///
/// Rules are evaluated in priority order (higher value = evaluated
/// first). The first rule whose conditions match the subject determines
/// the classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Opaque identifier of the rule.
    pub id: RuleId,
    /// A human-readable name for the rule.
    pub name: String,
    /// Optional description of what this rule covers.
    #[serde(default)]
    pub description: Option<String>,
    /// Priority for ordering. Higher values are evaluated first.
    #[serde(default)]
    pub priority: i32,
    /// Whether the rule participates in evaluation. The classifier does
    /// not read this flag; callers filter before handing rules over.
    #[serde(default = "default_true", alias = "isActive")]
    pub is_active: bool,
    /// The conditions a subject must satisfy.
    pub conditions: ConditionSet,
    /// The classification produced when the conditions match.
    pub outcome: Outcome,
    /// Where this rule was loaded from.
    #[serde(default = "RuleSource::inline")]
    pub source: RuleSource,
    /// Version number for tracking rule changes. Defaults to 0.
    #[serde(default)]
    pub version: u64,
}

const fn default_true() -> bool {
    true
}

impl RuleSource {
    const fn inline() -> Self {
        Self::Inline
    }
}

impl Rule {
    /// Create a new rule with the given id, name, conditions, and outcome.
    ///
    /// Defaults to priority 0, active, and `Inline` source.
    pub fn new(
        id: impl Into<RuleId>,
        name: impl Into<String>,
        conditions: ConditionSet,
        outcome: Outcome,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            priority: 0,
            is_active: true,
            conditions,
            outcome,
            source: RuleSource::Inline,
            version: 0,
        }
    }

    /// Set the priority of this rule.
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Set the description of this rule.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the active state of this rule.
    #[must_use]
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Set the source of this rule.
    #[must_use]
    pub fn with_source(mut self, source: RuleSource) -> Self {
        self.source = source;
        self
    }

    /// Set the version of this rule.
    #[must_use]
    pub fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    /// Evaluate this rule's conditions against a subject.
    #[must_use]
    pub fn matches(&self, subject: &Subject) -> bool {
        self.conditions.matches(subject)
    }
}
