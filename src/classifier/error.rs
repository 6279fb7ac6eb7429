//! Rule table error handling.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a rule table.
///
/// These are configuration defects; classification itself never fails.
#[derive(Error, Debug)]
pub enum RuleTableError {
    /// The rule file could not be read.
    #[error("Failed to read rule file {}: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The rule document is not valid YAML for the rule schema.
    #[error("Failed to parse rule table: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The table defines no languages at all.
    #[error("Rule table defines no languages")]
    Empty,

    /// Two rules share the same language name.
    #[error("Duplicate language name in rule table: {0}")]
    DuplicateName(String),

    /// A rule uses one of the fallback identifiers as its name.
    #[error("Language name {0:?} is reserved for fallback results")]
    ReservedName(String),

    /// A rule has a zero or negative priority.
    #[error("Language {name} has priority {priority}; priority must be positive")]
    InvalidPriority {
        /// Language name.
        name: String,
        /// Offending priority value.
        priority: i64,
    },

    /// A rule has no signature patterns and could never score.
    #[error("Language {0} has no signature patterns")]
    NoSignatures(String),

    /// A pattern failed to compile.
    #[error("Invalid pattern {pattern:?} for language {name}: {source}")]
    InvalidPattern {
        /// Language name.
        name: String,
        /// Pattern source.
        pattern: String,
        /// Compilation error.
        #[source]
        source: regex::Error,
    },
}
