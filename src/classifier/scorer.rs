//! Weighted pattern scorer.
//!
//! Every rule in the table is evaluated against the whole snippet. A language
//! earns one point per matching signature and loses [`EXCLUSION_PENALTY`] per
//! matching exclusion. A positive total is multiplied by the rule's priority.
//! The highest final score wins, with ties going to the rule listed first.

use serde::Serialize;
use tracing::{debug, trace};

use super::rules::{LanguageRule, RuleTable};

/// Sentinel for prose, blank input and anything without code-like punctuation.
pub const TEXT_SENTINEL: &str = "text";

/// Sentinel for input that looks like code but matches no configured language.
pub const CODE_SENTINEL: &str = "code";

/// Points subtracted for each matching exclusion pattern.
pub const EXCLUSION_PENALTY: i64 = 2;

/// Characters that mark unrecognized input as code rather than prose.
pub const CODE_MARKERS: [char; 5] = ['{', '}', '(', ')', ';'];

/// Final score of one language for one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateScore {
    /// Language identifier.
    pub language: String,
    /// Score after exclusions and weighting; may be negative.
    pub score: i64,
}

/// Returns true when `text` has nothing but whitespace.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Signature matches minus exclusion penalties, before weighting.
pub fn raw_score(rule: &LanguageRule, text: &str) -> i64 {
    let hits = rule
        .signatures()
        .iter()
        .filter(|matcher| matcher.matches(text))
        .count() as i64;
    let excluded = rule
        .exclusions()
        .iter()
        .filter(|matcher| matcher.matches(text))
        .count() as i64;

    hits - excluded * EXCLUSION_PENALTY
}

/// Raw score multiplied by priority when positive; left as-is otherwise.
pub fn final_score(rule: &LanguageRule, text: &str) -> i64 {
    let raw = raw_score(rule, text);
    if raw > 0 {
        raw * rule.priority()
    } else {
        raw
    }
}

/// Evaluates a rule table against snippets.
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'a> {
    table: &'a RuleTable,
}

impl<'a> Scorer<'a> {
    /// Creates a scorer over `table`.
    pub fn new(table: &'a RuleTable) -> Self {
        Self { table }
    }

    /// Scores every language, in table order.
    pub fn scores(&self, text: &str) -> Vec<CandidateScore> {
        self.table
            .iter()
            .map(|rule| {
                let score = final_score(rule, text);
                trace!(language = rule.name(), score, "Scored language");
                CandidateScore {
                    language: rule.name().to_string(),
                    score,
                }
            })
            .collect()
    }

    /// Scores every language and sorts by descending score.
    ///
    /// The sort is stable, so equal scores keep table order. Blank input
    /// yields an empty list.
    pub fn rank(&self, text: &str) -> Vec<CandidateScore> {
        if is_blank(text) {
            return Vec::new();
        }

        let mut candidates = self.scores(text);
        candidates.sort_by(|a, b| b.score.cmp(&a.score));
        candidates
    }

    /// Returns the best-matching language, if any scored above zero.
    pub fn best(&self, text: &str) -> Option<CandidateScore> {
        if is_blank(text) {
            return None;
        }

        let mut best: Option<CandidateScore> = None;
        for candidate in self.scores(text) {
            // Strict comparison keeps the earlier rule on ties.
            let better = best.as_ref().map_or(true, |b| candidate.score > b.score);
            if better {
                best = Some(candidate);
            }
        }

        best.filter(|candidate| candidate.score > 0)
    }

    /// Returns a language identifier or one of the sentinels. Never fails.
    pub fn classify(&self, text: &str) -> String {
        if is_blank(text) {
            return TEXT_SENTINEL.to_string();
        }

        match self.best(text) {
            Some(winner) => {
                debug!(
                    language = %winner.language,
                    score = winner.score,
                    "Scorer selected language"
                );
                winner.language
            }
            None => {
                let sentinel = fallback(text);
                debug!(sentinel, "No language scored positively, using fallback");
                sentinel.to_string()
            }
        }
    }
}

/// Picks a sentinel for input no rule claimed.
pub fn fallback(text: &str) -> &'static str {
    if text.contains(CODE_MARKERS) {
        CODE_SENTINEL
    } else {
        TEXT_SENTINEL
    }
}
