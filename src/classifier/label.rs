//! Display labels for language identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Glyph prepended to labels in the emphasized style.
pub const EMPHASIS_GLYPH: &str = "✦";

/// Identifier to display-name table.
const DISPLAY_NAMES: &[(&str, &str)] = &[
    ("python", "Python"),
    ("java", "Java"),
    ("csharp", "C#"),
    ("typescript", "TypeScript"),
    ("javascript", "JavaScript"),
    ("rust", "Rust"),
    ("go", "Go"),
    ("cpp", "C++"),
    ("c", "C"),
    ("ruby", "Ruby"),
    ("php", "PHP"),
    ("sql", "SQL"),
    ("html", "HTML"),
    ("css", "CSS"),
    ("bash", "Shell"),
    ("json", "JSON"),
    ("yaml", "YAML"),
    ("kotlin", "Kotlin"),
    ("swift", "Swift"),
    ("markdown", "Markdown"),
    ("xml", "XML"),
    ("toml", "TOML"),
    ("text", "Plain Text"),
    ("code", "Code"),
];

/// How labels are presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelStyle {
    /// The display name alone.
    #[default]
    Plain,
    /// The display name preceded by [`EMPHASIS_GLYPH`].
    Emphasized,
}

impl fmt::Display for LabelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Emphasized => write!(f, "emphasized"),
        }
    }
}

impl FromStr for LabelStyle {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "plain" => Ok(Self::Plain),
            "emphasized" | "emphasised" | "legacy" => Ok(Self::Emphasized),
            other => Err(anyhow::anyhow!(
                "Unknown label style '{other}', expected 'plain' or 'emphasized'"
            )),
        }
    }
}

/// Returns the display name for `language`, echoing unknown identifiers.
pub fn display_name(language: &str) -> &str {
    DISPLAY_NAMES
        .iter()
        .find(|(id, _)| *id == language)
        .map_or(language, |(_, name)| *name)
}

/// Formats `language` as a label in the given style.
pub fn format_label(language: &str, style: LabelStyle) -> String {
    let name = display_name(language);
    match style {
        LabelStyle::Plain => name.to_string(),
        LabelStyle::Emphasized => format!("{EMPHASIS_GLYPH} {name}"),
    }
}

/// Label formatter bound to one style.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelFormatter {
    style: LabelStyle,
}

impl LabelFormatter {
    /// Creates a formatter for `style`.
    pub fn new(style: LabelStyle) -> Self {
        Self { style }
    }

    /// Configured style.
    pub fn style(&self) -> LabelStyle {
        self.style
    }

    /// Formats `language`.
    pub fn format(&self, language: &str) -> String {
        format_label(language, self.style)
    }
}
