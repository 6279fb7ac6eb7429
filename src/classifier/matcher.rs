//! Text matching abstraction behind signature and exclusion patterns.

use std::fmt;

use regex::Regex;

/// A rule that can be evaluated against a whole snippet.
///
/// Rule tables only ever hold matchers through this trait, so the scoring
/// logic does not depend on the underlying matching engine.
pub trait TextMatcher: fmt::Debug + Send + Sync {
    /// Returns true when the rule matches anywhere in `text`.
    fn matches(&self, text: &str) -> bool;

    /// Returns the source form of the rule, for diagnostics.
    fn pattern(&self) -> &str;
}

/// Regular-expression matcher backed by the `regex` crate.
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    regex: Regex,
}

impl RegexMatcher {
    /// Compiles `pattern` into a matcher.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }
}

impl TextMatcher for RegexMatcher {
    fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}
