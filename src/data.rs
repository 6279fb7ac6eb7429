//! Serializable report views and their renderers.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::classifier::{CandidateScore, ClassificationResult, DetectionSource, RuleTable};

/// Version information included in reports.
#[derive(Debug, Clone, Serialize)]
pub struct VersionInfo {
    /// Version of the snippet-lang crate.
    pub snippet_lang: String,
}

impl Default for VersionInfo {
    fn default() -> Self {
        Self {
            snippet_lang: crate::VERSION.to_string(),
        }
    }
}

/// Result of classifying one input.
#[derive(Debug, Clone, Serialize)]
pub struct DetectionReport {
    /// Version information.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub versions: Option<VersionInfo>,
    /// Where the snippet came from: a file path or `stdin`.
    pub input: String,
    /// Detected language identifier.
    pub language: String,
    /// Display label.
    pub label: String,
    /// Stage that decided.
    pub detected_by: DetectionSource,
    /// Positive-scoring candidates (only present when ranking was requested).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<CandidateScore>>,
}

impl DetectionReport {
    /// Builds a report from a classification.
    pub fn new(input: impl Into<String>, result: ClassificationResult) -> Self {
        Self {
            versions: None,
            input: input.into(),
            language: result.language,
            label: result.label,
            detected_by: result.source,
            candidates: None,
        }
    }

    /// Attaches ranked candidates, keeping only positive scores.
    #[must_use]
    pub fn with_candidates(mut self, ranked: Vec<CandidateScore>) -> Self {
        self.candidates = Some(ranked.into_iter().filter(|c| c.score > 0).collect());
        self
    }

    /// Attaches version information.
    #[must_use]
    pub fn with_versions(mut self) -> Self {
        self.versions = Some(VersionInfo::default());
        self
    }

    /// Renders the report as plain text.
    pub fn to_text(&self) -> String {
        let mut output = format!("{} ({})\n", self.label, self.language);
        if let Some(candidates) = &self.candidates {
            for candidate in candidates {
                output.push_str(&format!("  {:<12} {:>4}\n", candidate.language, candidate.score));
            }
        }
        output
    }
}

/// One language in a rules listing.
#[derive(Debug, Clone, Serialize)]
pub struct LanguageSummary {
    /// Language identifier.
    pub name: String,
    /// Priority weight.
    pub priority: i64,
    /// Number of signature patterns.
    pub signatures: usize,
    /// Number of exclusion patterns.
    pub exclusions: usize,
    /// Pattern sources (only present when requested).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patterns: Option<PatternList>,
}

/// Pattern sources for one language.
#[derive(Debug, Clone, Serialize)]
pub struct PatternList {
    /// Signature pattern sources.
    pub signatures: Vec<String>,
    /// Exclusion pattern sources.
    pub exclusions: Vec<String>,
}

/// Listing of an active rule table.
#[derive(Debug, Clone, Serialize)]
pub struct RulesReport {
    /// Where the rules came from: `embedded` or a file path.
    pub source: String,
    /// Languages in tie-break order.
    pub languages: Vec<LanguageSummary>,
}

impl RulesReport {
    /// Summarizes `table`.
    pub fn from_table(source: impl Into<String>, table: &RuleTable, with_patterns: bool) -> Self {
        let languages = table
            .iter()
            .map(|rule| LanguageSummary {
                name: rule.name().to_string(),
                priority: rule.priority(),
                signatures: rule.signatures().len(),
                exclusions: rule.exclusions().len(),
                patterns: with_patterns.then(|| PatternList {
                    signatures: rule.signatures().iter().map(|m| m.pattern().to_string()).collect(),
                    exclusions: rule.exclusions().iter().map(|m| m.pattern().to_string()).collect(),
                }),
            })
            .collect();

        Self {
            source: source.into(),
            languages,
        }
    }

    /// Renders the listing as an aligned table.
    pub fn to_text(&self) -> String {
        let mut output = format!("Rules: {}\n", self.source);
        for language in &self.languages {
            output.push_str(&format!(
                "  {:<12} priority {:>2}  signatures {:>2}  exclusions {:>2}\n",
                language.name, language.priority, language.signatures, language.exclusions
            ));
            if let Some(patterns) = &language.patterns {
                for pattern in &patterns.signatures {
                    output.push_str(&format!("      + {pattern}\n"));
                }
                for pattern in &patterns.exclusions {
                    output.push_str(&format!("      - {pattern}\n"));
                }
            }
        }
        output
    }
}

/// Serializes `data` as YAML.
pub fn to_yaml<T: Serialize>(data: &T) -> Result<String> {
    serde_yaml::to_string(data).context("Failed to serialize to YAML")
}

/// Serializes `data` as pretty-printed JSON.
pub fn to_json<T: Serialize>(data: &T) -> Result<String> {
    serde_json::to_string_pretty(data).context("Failed to serialize to JSON")
}
