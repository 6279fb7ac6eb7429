//! Code-language classification for pasted snippets.
//!
//! Classification runs in three stages: a fenced-code tag, when present,
//! decides outright; otherwise the weighted [`Scorer`] picks a language or a
//! sentinel; finally the identifier is turned into a display label. The
//! result is a suggestion for a "detected language" field and never an error.

pub mod error;
pub mod fence;
pub mod label;
pub mod matcher;
pub mod rules;
pub mod scorer;

use serde::Serialize;

pub use error::RuleTableError;
pub use fence::{canonicalize_tag, resolve_override};
pub use label::{format_label, LabelFormatter, LabelStyle};
pub use matcher::{RegexMatcher, TextMatcher};
pub use rules::{get_rule_table, LanguageRule, RuleSpec, RuleTable};
pub use scorer::{CandidateScore, Scorer, CODE_SENTINEL, EXCLUSION_PENALTY, TEXT_SENTINEL};

/// Stage that decided a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionSource {
    /// A fenced-code tag named the language.
    Override,
    /// A configured language scored highest.
    Scorer,
    /// Nothing scored; a sentinel was chosen.
    Fallback,
}

/// Outcome of one classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    /// Machine identifier, e.g. `python` or a sentinel.
    pub language: String,
    /// Human-facing label.
    pub label: String,
    /// Stage that produced the identifier.
    pub source: DetectionSource,
}

/// Classifier over a borrowed rule table.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    scorer: Scorer<'a>,
    labels: LabelFormatter,
}

impl Classifier<'static> {
    /// Creates a classifier over the embedded rule table.
    pub fn new() -> Self {
        Self::with_table(get_rule_table())
    }
}

impl Default for Classifier<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Classifier<'a> {
    /// Creates a classifier over `table`.
    pub fn with_table(table: &'a RuleTable) -> Self {
        Self {
            scorer: Scorer::new(table),
            labels: LabelFormatter::default(),
        }
    }

    /// Sets the label style.
    #[must_use]
    pub fn with_label_style(mut self, style: LabelStyle) -> Self {
        self.labels = LabelFormatter::new(style);
        self
    }

    /// Classifies `text` and formats its label.
    pub fn classify(&self, text: &str) -> ClassificationResult {
        let (language, source) = self.decide(text);
        let label = self.labels.format(&language);
        ClassificationResult {
            language,
            label,
            source,
        }
    }

    /// Returns only the language identifier for `text`.
    pub fn detect_language(&self, text: &str) -> String {
        self.decide(text).0
    }

    /// Ranks every configured language against `text`.
    ///
    /// Overrides are not consulted; this shows what the scorer alone sees.
    pub fn rank(&self, text: &str) -> Vec<CandidateScore> {
        self.scorer.rank(text)
    }

    fn decide(&self, text: &str) -> (String, DetectionSource) {
        if let Some(language) = resolve_override(text) {
            return (language, DetectionSource::Override);
        }

        let language = self.scorer.classify(text);
        let source = if language == TEXT_SENTINEL || language == CODE_SENTINEL {
            DetectionSource::Fallback
        } else {
            DetectionSource::Scorer
        };
        (language, source)
    }
}

/// Classifies `text` with the embedded rules and plain labels.
pub fn classify(text: &str) -> ClassificationResult {
    Classifier::new().classify(text)
}
