use std::hash::{Hash, Hasher};
use std::path::Path;

use tracing::{debug, instrument};

use stipend_core::{Classification, Subject};

use crate::engine::trace::{EvaluationTrace, TraceEntry, TraceResult};
use crate::error::RuleError;
use crate::frontend::RuleFrontend;
use crate::ir::rule::Rule;

/// Classifies subjects against a prioritized set of allowance rules.
///
/// Evaluation is first-match-wins over rules sorted by descending
/// priority; ties keep the order rules were supplied in. The classifier
/// never reads `is_active` — callers hand over the rules they want
/// evaluated, or use [`Classifier::from_active`].
pub struct Classifier {
    rules: Vec<Rule>,
}

impl Classifier {
    /// Create a new classifier with the given rules.
    ///
    /// Rules are sorted by priority, highest first; the sort is stable so
    /// equal priorities keep their input order.
    #[must_use]
    pub fn new(mut rules: Vec<Rule>) -> Self {
        rules.sort_by(|a, b| b.priority.cmp(&a.priority));
        Self { rules }
    }

    /// Create a classifier from a mixed rule set, keeping only active rules.
    #[must_use]
    pub fn from_active(rules: Vec<Rule>) -> Self {
        Self::new(rules.into_iter().filter(|r| r.is_active).collect())
    }

    /// Return a reference to the sorted rules.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Add a rule and re-sort.
    pub fn add_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
        self.rules.sort_by(|a, b| b.priority.cmp(&a.priority));
    }

    /// Add multiple rules and re-sort.
    pub fn add_rules(&mut self, rules: Vec<Rule>) {
        self.rules.extend(rules);
        self.rules.sort_by(|a, b| b.priority.cmp(&a.priority));
    }

    /// Compute a fingerprint of the current rule set.
    ///
    /// The hash combines each rule's id, priority, version, and active
    /// flag in evaluation order. Callers that cache classifications can
    /// compare fingerprints to detect that rules changed underneath them.
    #[must_use]
    pub fn rules_version(&self) -> u64 {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        for rule in &self.rules {
            rule.id.as_str().hash(&mut hasher);
            rule.priority.hash(&mut hasher);
            rule.version.hash(&mut hasher);
            rule.is_active.hash(&mut hasher);
        }
        hasher.finish()
    }

    /// Classify a subject.
    ///
    /// Returns the outcome of the highest-priority matching rule, or the
    /// null classification when nothing matches. Pure and infallible:
    /// malformed facts or conditions evaluate as non-matches.
    #[instrument(skip_all, fields(rules_count = self.rules.len()))]
    #[must_use]
    pub fn classify(&self, subject: &Subject) -> Classification {
        for rule in &self.rules {
            if rule.matches(subject) {
                debug!(rule = %rule.id, priority = rule.priority, "rule matched");
                return Classification::matched(rule.id.clone(), rule.outcome.clone());
            }
        }
        debug!("no rule matched");
        Classification::unmatched()
    }

    /// Classify a subject, recording what happened to every rule.
    #[instrument(skip_all, fields(rules_count = self.rules.len()))]
    #[must_use]
    pub fn classify_traced(&self, subject: &Subject) -> (Classification, EvaluationTrace) {
        let mut entries = Vec::with_capacity(self.rules.len());
        let mut result = Classification::unmatched();

        for rule in &self.rules {
            if result.is_match() {
                entries.push(TraceEntry::new(rule, TraceResult::Skipped));
                continue;
            }
            if rule.matches(subject) {
                entries.push(TraceEntry::new(rule, TraceResult::Matched));
                result = Classification::matched(rule.id.clone(), rule.outcome.clone());
            } else {
                entries.push(TraceEntry::new(rule, TraceResult::NotMatched));
            }
        }

        (result, EvaluationTrace { entries })
    }

    /// Load rules from a directory using the provided frontends.
    ///
    /// Walks the directory for files matching frontend extensions, parses
    /// each one, and adds the resulting rules. Returns the total number of
    /// rules loaded.
    pub fn load_directory(
        &mut self,
        path: &Path,
        frontends: &[&dyn RuleFrontend],
    ) -> Result<usize, RuleError> {
        let mut loaded = 0;
        let entries = std::fs::read_dir(path).map_err(|e| {
            RuleError::Parse(format!("cannot read directory {}: {e}", path.display()))
        })?;

        for entry in entries {
            let entry =
                entry.map_err(|e| RuleError::Parse(format!("directory entry error: {e}")))?;
            let file_path = entry.path();

            if !file_path.is_file() {
                continue;
            }

            let extension = file_path
                .extension()
                .and_then(|ext| ext.to_str())
                .unwrap_or("");

            for frontend in frontends {
                if frontend.extensions().contains(&extension) {
                    let rules = frontend.parse_file(&file_path)?;
                    loaded += rules.len();
                    self.rules.extend(rules);
                    break;
                }
            }
        }

        self.rules.sort_by(|a, b| b.priority.cmp(&a.priority));
        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::condition::{Condition, ConditionSet, Operator};
    use stipend_core::Outcome;

    fn nurse_base() -> Rule {
        Rule::new(
            "nurse-base",
            "Nurse base tier",
            ConditionSet::all(vec![Condition::new("position", Operator::Equal, "Nurse")]),
            Outcome::new("Nurse", "1"),
        )
        .with_priority(50)
    }

    fn nurse_icu() -> Rule {
        Rule::new(
            "nurse-icu",
            "ICU-certified nurse",
            ConditionSet::all(vec![
                Condition::new("position", Operator::Equal, "Nurse"),
                Condition::new("certifications", Operator::In, vec!["ICU Certified"]),
            ]),
            Outcome::new("Nurse", "3"),
        )
        .with_priority(100)
    }

    fn icu_nurse_subject() -> Subject {
        Subject::new()
            .with_fact("position", "Nurse")
            .with_fact("certifications", vec!["ICU Certified"])
    }

    #[test]
    fn empty_rule_set_returns_null_classification() {
        let classifier = Classifier::new(vec![]);
        let classification = classifier.classify(&icu_nurse_subject());
        assert!(!classification.is_match());
        assert_eq!(classification, Classification::unmatched());
    }

    #[test]
    fn no_match_returns_null_classification() {
        let classifier = Classifier::new(vec![nurse_base()]);
        let subject = Subject::new().with_fact("position", "Pharmacist");
        assert!(!classifier.classify(&subject).is_match());
    }

    #[test]
    fn higher_priority_wins_regardless_of_input_order() {
        let subject = icu_nurse_subject();

        for rules in [
            vec![nurse_base(), nurse_icu()],
            vec![nurse_icu(), nurse_base()],
        ] {
            let classifier = Classifier::new(rules);
            let classification = classifier.classify(&subject);
            assert_eq!(classification.rule.as_ref().unwrap().as_str(), "nurse-icu");
            assert_eq!(classification.tier.as_ref().unwrap().as_str(), "3");
        }
    }

    #[test]
    fn first_match_stops_evaluation() {
        // Both rules match; only the higher-priority outcome is returned.
        let classifier = Classifier::new(vec![nurse_base(), nurse_icu()]);
        let classification = classifier.classify(&icu_nurse_subject());
        assert_eq!(
            classification.outcome().unwrap(),
            Outcome::new("Nurse", "3")
        );
    }

    #[test]
    fn priority_ties_keep_input_order() {
        let first = nurse_base().with_priority(10);
        let second = Rule::new(
            "nurse-alt",
            "Alternate nurse rule",
            ConditionSet::all(vec![Condition::new("position", Operator::Equal, "Nurse")]),
            Outcome::new("Nurse", "2"),
        )
        .with_priority(10);

        let classifier = Classifier::new(vec![first, second]);
        let classification = classifier.classify(&icu_nurse_subject());
        assert_eq!(classification.rule.as_ref().unwrap().as_str(), "nurse-base");
    }

    #[test]
    fn classifier_ignores_active_flag() {
        let classifier = Classifier::new(vec![nurse_icu().with_active(false)]);
        assert!(classifier.classify(&icu_nurse_subject()).is_match());
    }

    #[test]
    fn from_active_filters_inactive_rules() {
        let classifier = Classifier::from_active(vec![nurse_icu().with_active(false), nurse_base()]);
        let classification = classifier.classify(&icu_nurse_subject());
        assert_eq!(classification.rule.as_ref().unwrap().as_str(), "nurse-base");
    }

    #[test]
    fn add_rule_resorts() {
        let mut classifier = Classifier::new(vec![nurse_base()]);
        classifier.add_rule(nurse_icu());
        assert_eq!(classifier.rules()[0].id.as_str(), "nurse-icu");
    }

    #[test]
    fn rules_version_changes_with_rule_set() {
        let classifier = Classifier::new(vec![nurse_base()]);
        let v1 = classifier.rules_version();

        let mut classifier = Classifier::new(vec![nurse_base()]);
        classifier.add_rule(nurse_icu());
        let v2 = classifier.rules_version();

        assert_ne!(v1, v2);
    }

    #[test]
    fn rules_version_stable_for_same_rules() {
        let a = Classifier::new(vec![nurse_base(), nurse_icu()]);
        let b = Classifier::new(vec![nurse_icu(), nurse_base()]);
        // Sorting normalizes the order, so the fingerprints agree.
        assert_eq!(a.rules_version(), b.rules_version());
    }

    #[test]
    fn traced_classification_records_each_rule() {
        let fallback = Rule::new(
            "fallback",
            "Catch-all",
            ConditionSet::any(vec![Condition::new("position", Operator::NotEqual, "")]),
            Outcome::new("General", "1"),
        )
        .with_priority(-1);

        let classifier = Classifier::new(vec![nurse_base(), nurse_icu(), fallback]);
        let (classification, trace) = classifier.classify_traced(&icu_nurse_subject());

        assert!(classification.is_match());
        assert_eq!(trace.matched_rule().unwrap().as_str(), "nurse-icu");
        assert_eq!(trace.entries.len(), 3);
        assert_eq!(trace.entries[0].result, TraceResult::Matched);
        assert_eq!(trace.entries[1].result, TraceResult::Skipped);
        assert_eq!(trace.entries[2].result, TraceResult::Skipped);
        assert_eq!(trace.evaluated_count(), 1);
        assert_eq!(trace.skipped_count(), 2);
    }

    #[test]
    fn traced_classification_without_match() {
        let classifier = Classifier::new(vec![nurse_base()]);
        let subject = Subject::new().with_fact("position", "Pharmacist");
        let (classification, trace) = classifier.classify_traced(&subject);

        assert!(!classification.is_match());
        assert!(trace.matched_rule().is_none());
        assert_eq!(trace.entries[0].result, TraceResult::NotMatched);
    }
}
