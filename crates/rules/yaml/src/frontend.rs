use std::path::Path;

use stipend_core::{Outcome, RuleId};
use stipend_rules::ir::condition::{Condition, ConditionSet};
use stipend_rules::ir::rule::{Rule, RuleSource};
use stipend_rules::{RuleError, RuleFrontend};

use crate::parser::{YamlCondition, YamlConditions, YamlRule, YamlRuleFile};

/// A [`RuleFrontend`] implementation that parses YAML rule files and
/// compiles them into the stipend rule IR.
pub struct YamlFrontend;

impl RuleFrontend for YamlFrontend {
    fn extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }

    fn parse(&self, content: &str) -> Result<Vec<Rule>, RuleError> {
        let file: YamlRuleFile = serde_yaml_ng::from_str(content)
            .map_err(|e| RuleError::Parse(format!("YAML parse error: {e}")))?;

        file.rules
            .into_iter()
            .map(|yaml_rule| compile_rule(yaml_rule, None))
            .collect()
    }

    fn parse_file(&self, path: &Path) -> Result<Vec<Rule>, RuleError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| RuleError::Parse(format!("cannot read {}: {e}", path.display())))?;

        let file: YamlRuleFile = serde_yaml_ng::from_str(&content).map_err(|e| {
            RuleError::Parse(format!("YAML parse error in {}: {e}", path.display()))
        })?;

        file.rules
            .into_iter()
            .map(|yaml_rule| compile_rule(yaml_rule, Some(path)))
            .collect()
    }
}

/// Compile a single `YamlRule` into the IR `Rule`.
fn compile_rule(yaml: YamlRule, file: Option<&Path>) -> Result<Rule, RuleError> {
    let conditions = compile_conditions(yaml.conditions, &yaml.id)?;
    let outcome = Outcome::new(yaml.outcome.allowance_group, yaml.outcome.tier);
    let source = RuleSource::Yaml {
        file: file.map(|p| p.display().to_string()),
    };

    Ok(Rule {
        id: RuleId::new(yaml.id),
        name: yaml.name,
        description: yaml.description,
        priority: yaml.priority,
        is_active: yaml.active,
        conditions,
        outcome,
        source,
        version: 0,
    })
}

/// Compile the `all` / `any` lists, preserving which side each condition
/// came from.
fn compile_conditions(yaml: YamlConditions, rule_id: &str) -> Result<ConditionSet, RuleError> {
    let compile_list = |list: Vec<YamlCondition>| -> Result<Vec<Condition>, RuleError> {
        list.into_iter().map(|c| compile_condition(c, rule_id)).collect()
    };

    Ok(ConditionSet {
        all: yaml.all.map(compile_list).transpose()?,
        any: yaml.any.map(compile_list).transpose()?,
    })
}

/// Compile a single condition, rejecting unknown operator names.
fn compile_condition(yaml: YamlCondition, rule_id: &str) -> Result<Condition, RuleError> {
    let operator = yaml
        .operator
        .parse()
        .map_err(|e| RuleError::Parse(format!("rule {rule_id}: {e}")))?;

    Ok(Condition {
        fact: yaml.fact,
        operator,
        value: yaml.value,
    })
}
