//! Fenced-code-block language overrides.
//!
//! An author who writes ```` ```py ```` has already said what the snippet is;
//! that declaration wins over any heuristic score.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// A line opening a fence (three or more backticks or tildes) and its tag.
#[allow(clippy::unwrap_used)] // Static pattern
static FENCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:`{3,}|~{3,})[ \t]*([A-Za-z0-9_+#.\-]+)").unwrap()
});

/// Short tags and their canonical language identifiers.
const TAG_ALIASES: &[(&str, &str)] = &[
    ("py", "python"),
    ("py3", "python"),
    ("python3", "python"),
    ("ts", "typescript"),
    ("tsx", "typescript"),
    ("js", "javascript"),
    ("jsx", "javascript"),
    ("mjs", "javascript"),
    ("node", "javascript"),
    ("rs", "rust"),
    ("golang", "go"),
    ("c++", "cpp"),
    ("cc", "cpp"),
    ("cxx", "cpp"),
    ("hpp", "cpp"),
    ("h", "c"),
    ("c#", "csharp"),
    ("cs", "csharp"),
    ("rb", "ruby"),
    ("sh", "bash"),
    ("shell", "bash"),
    ("zsh", "bash"),
    ("console", "bash"),
    ("yml", "yaml"),
    ("htm", "html"),
    ("psql", "sql"),
    ("postgres", "sql"),
    ("kt", "kotlin"),
    ("md", "markdown"),
    ("txt", "text"),
    ("plaintext", "text"),
];

/// Maps a fence tag to its canonical identifier.
///
/// Unknown tags are returned lowercased and otherwise unchanged.
pub fn canonicalize_tag(tag: &str) -> String {
    let lowered = tag.trim().to_lowercase();
    TAG_ALIASES
        .iter()
        .find(|(alias, _)| *alias == lowered)
        .map_or(lowered, |(_, canonical)| (*canonical).to_string())
}

/// Returns the language declared by the first tagged fence in `text`.
///
/// A fence with no tag is not an override.
pub fn resolve_override(text: &str) -> Option<String> {
    let captures = FENCE_PATTERN.captures(text)?;
    let tag = captures.get(1)?.as_str();
    let language = canonicalize_tag(tag);
    debug!(tag, language = %language, "Fence tag overrides scoring");
    Some(language)
}
