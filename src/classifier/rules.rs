//! Language rule table.
//!
//! The table is an ordered list of [`LanguageRule`]s. The built-in table is
//! embedded from `templates/languages.yaml` and built once per process; custom
//! tables use the same YAML schema and can be loaded from disk.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::RuleTableError;
use super::matcher::{RegexMatcher, TextMatcher};
use super::scorer::{CODE_SENTINEL, TEXT_SENTINEL};

/// Embedded rule document.
pub const LANGUAGES_YAML: &str = include_str!("../templates/languages.yaml");

/// Serialized form of a single language rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RuleSpec {
    /// Unique language identifier.
    pub name: String,
    /// Weight applied to a positive score.
    pub priority: i64,
    /// Patterns whose presence is evidence for this language.
    pub signatures: Vec<String>,
    /// Patterns whose presence is evidence against this language.
    #[serde(default)]
    pub exclusions: Vec<String>,
}

/// Top-level rule document.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RuleFile {
    /// Rules in tie-break order.
    pub languages: Vec<RuleSpec>,
}

/// Detection rules for one language.
#[derive(Debug)]
pub struct LanguageRule {
    name: String,
    priority: i64,
    signatures: Vec<Box<dyn TextMatcher>>,
    exclusions: Vec<Box<dyn TextMatcher>>,
}

impl LanguageRule {
    /// Creates a rule from already-built matchers.
    ///
    /// Invariants are checked when the rule is added to a [`RuleTable`].
    pub fn new(
        name: impl Into<String>,
        priority: i64,
        signatures: Vec<Box<dyn TextMatcher>>,
        exclusions: Vec<Box<dyn TextMatcher>>,
    ) -> Self {
        Self {
            name: name.into(),
            priority,
            signatures,
            exclusions,
        }
    }

    /// Compiles a rule from its serialized form.
    pub fn from_spec(spec: &RuleSpec) -> Result<Self, RuleTableError> {
        let compile = |patterns: &[String]| -> Result<Vec<Box<dyn TextMatcher>>, RuleTableError> {
            patterns
                .iter()
                .map(|pattern| {
                    RegexMatcher::new(pattern)
                        .map(|m| Box::new(m) as Box<dyn TextMatcher>)
                        .map_err(|source| RuleTableError::InvalidPattern {
                            name: spec.name.clone(),
                            pattern: pattern.clone(),
                            source,
                        })
                })
                .collect()
        };

        Ok(Self::new(
            spec.name.clone(),
            spec.priority,
            compile(&spec.signatures)?,
            compile(&spec.exclusions)?,
        ))
    }

    /// Language identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Priority weight.
    pub fn priority(&self) -> i64 {
        self.priority
    }

    /// Signature matchers, in configured order.
    pub fn signatures(&self) -> &[Box<dyn TextMatcher>] {
        &self.signatures
    }

    /// Exclusion matchers.
    pub fn exclusions(&self) -> &[Box<dyn TextMatcher>] {
        &self.exclusions
    }
}

/// Immutable, ordered collection of language rules.
#[derive(Debug)]
pub struct RuleTable {
    rules: Vec<LanguageRule>,
}

impl RuleTable {
    /// Builds a table, validating every rule.
    pub fn new(rules: Vec<LanguageRule>) -> Result<Self, RuleTableError> {
        if rules.is_empty() {
            return Err(RuleTableError::Empty);
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for rule in &rules {
            if rule.name == TEXT_SENTINEL || rule.name == CODE_SENTINEL {
                return Err(RuleTableError::ReservedName(rule.name.clone()));
            }
            if !seen.insert(rule.name.as_str()) {
                return Err(RuleTableError::DuplicateName(rule.name.clone()));
            }
            if rule.priority <= 0 {
                return Err(RuleTableError::InvalidPriority {
                    name: rule.name.clone(),
                    priority: rule.priority,
                });
            }
            if rule.signatures.is_empty() {
                return Err(RuleTableError::NoSignatures(rule.name.clone()));
            }
        }

        Ok(Self { rules })
    }

    /// Compiles a table from serialized rules.
    pub fn from_specs(specs: &[RuleSpec]) -> Result<Self, RuleTableError> {
        let rules = specs
            .iter()
            .map(LanguageRule::from_spec)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(rules)
    }

    /// Parses and compiles a YAML rule document.
    pub fn from_yaml(yaml: &str) -> Result<Self, RuleTableError> {
        let file: RuleFile = serde_yaml::from_str(yaml)?;
        Self::from_specs(&file.languages)
    }

    /// Loads a YAML rule document from disk.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, RuleTableError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| RuleTableError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let table = Self::from_yaml(&content)?;
        debug!(
            path = %path.display(),
            languages = table.len(),
            "Loaded custom rule table"
        );
        Ok(table)
    }

    /// Builds the table from the embedded rule document.
    pub fn load_embedded() -> Result<Self, RuleTableError> {
        Self::from_yaml(LANGUAGES_YAML)
    }

    /// Iterates rules in stable configured order.
    pub fn iter(&self) -> impl Iterator<Item = &LanguageRule> {
        self.rules.iter()
    }

    /// Looks up a rule by language name.
    pub fn get(&self, name: &str) -> Option<&LanguageRule> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    /// Language names in configured order.
    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(LanguageRule::name).collect()
    }

    /// Number of configured languages.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Always false for a validated table.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Global embedded rule table.
static RULE_TABLE: OnceLock<RuleTable> = OnceLock::new();

/// Returns the embedded rule table, building it on first use.
#[allow(clippy::expect_used)] // Embedded table is validated by tests
pub fn get_rule_table() -> &'static RuleTable {
    RULE_TABLE.get_or_init(|| RuleTable::load_embedded().expect("Failed to load embedded rule table"))
}
