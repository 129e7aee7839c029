use std::path::Path;

use crate::error::RuleError;
use crate::ir::rule::Rule;

/// A parser for an on-disk rule representation.
///
/// Frontends turn rule files into IR [`Rule`]s; the classifier consumes
/// them through [`Classifier::load_directory`](crate::Classifier::load_directory).
pub trait RuleFrontend {
    /// File extensions (without the dot) this frontend claims.
    fn extensions(&self) -> &[&str];

    /// Parse rules from file content.
    fn parse(&self, content: &str) -> Result<Vec<Rule>, RuleError>;

    /// Parse rules from a file on disk.
    fn parse_file(&self, path: &Path) -> Result<Vec<Rule>, RuleError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| RuleError::Parse(format!("cannot read {}: {e}", path.display())))?;
        self.parse(&content)
    }
}
