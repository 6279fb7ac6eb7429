//! # snippet-lang
//!
//! Detects the programming language of pasted code snippets.
//!
//! A fenced-code tag such as ```` ```py ```` is honored first. Otherwise a
//! weighted, exclusion-adjusted pattern scorer picks the most likely language
//! from an ordered rule table, falling back to the `code` or `text` sentinel
//! when nothing matches.
//!
//! ## Quick Start
//!
//! ```rust
//! use snippet_lang::classifier::classify;
//!
//! let result = classify("def foo():\n    print('hi')");
//! assert_eq!(result.language, "python");
//! assert_eq!(result.label, "Python");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod classifier;
pub mod cli;
pub mod config;
pub mod data;

pub use crate::classifier::{classify, ClassificationResult, Classifier};
pub use crate::cli::Cli;

/// The current version of snippet-lang.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
