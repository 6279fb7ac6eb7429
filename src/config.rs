//! Settings and environment configuration.
//!
//! Settings are read from the first existing of
//! `$XDG_CONFIG_HOME/snippet-lang/settings.json`,
//! `$HOME/.config/snippet-lang/settings.json` and
//! `$HOME/.snippet-lang/settings.json`. Environment variables override the
//! file, and command-line flags override both.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classifier::{LabelStyle, RuleTable};

/// Environment variable naming a custom rule file.
pub const RULES_ENV: &str = "SNIPPET_LANG_RULES";

/// Environment variable selecting the label style.
pub const LABEL_STYLE_ENV: &str = "SNIPPET_LANG_LABEL_STYLE";

const APP_DIR: &str = "snippet-lang";
const SETTINGS_FILE: &str = "settings.json";

/// Settings loaded from `settings.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    /// Custom rule document replacing the embedded table.
    #[serde(default, rename = "rulesFile")]
    pub rules_file: Option<PathBuf>,

    /// Label presentation.
    #[serde(default, rename = "labelStyle")]
    pub label_style: Option<LabelStyle>,
}

impl Settings {
    /// Loads settings from the first existing default location.
    pub fn load() -> Result<Self> {
        match Self::find_settings_path() {
            Some(path) => Self::load_from_path(path),
            None => Ok(Self::default()),
        }
    }

    /// Loads settings from a specific path.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // A missing file means defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        let settings = serde_json::from_str::<Self>(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;
        debug!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    /// Candidate settings paths, most specific first.
    pub fn settings_paths() -> Vec<PathBuf> {
        Self::settings_paths_from(env::var_os("XDG_CONFIG_HOME"), dirs::home_dir())
    }

    /// Candidate settings paths for the given `XDG_CONFIG_HOME` and home
    /// directory. An empty `xdg` is treated as unset.
    pub fn settings_paths_from(xdg: Option<OsString>, home: Option<PathBuf>) -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Some(xdg) = xdg.filter(|v| !v.is_empty()) {
            paths.push(PathBuf::from(xdg).join(APP_DIR).join(SETTINGS_FILE));
        }
        if let Some(home) = home {
            paths.push(home.join(".config").join(APP_DIR).join(SETTINGS_FILE));
            paths.push(home.join(format!(".{APP_DIR}")).join(SETTINGS_FILE));
        }

        paths
    }

    /// Returns the first settings path that exists.
    pub fn find_settings_path() -> Option<PathBuf> {
        Self::settings_paths().into_iter().find(|p| p.exists())
    }

    /// Applies overrides from the process environment.
    pub fn apply_env(self) -> Result<Self> {
        self.apply_env_from(|key| env::var(key).ok())
    }

    /// Applies overrides from `lookup`, which stands in for the environment.
    pub fn apply_env_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(rules) = lookup(RULES_ENV).filter(|v| !v.trim().is_empty()) {
            self.rules_file = Some(PathBuf::from(rules));
        }
        if let Some(style) = lookup(LABEL_STYLE_ENV).filter(|v| !v.trim().is_empty()) {
            let style = style
                .parse::<LabelStyle>()
                .with_context(|| format!("Invalid value for {LABEL_STYLE_ENV}"))?;
            self.label_style = Some(style);
        }
        Ok(self)
    }
}

/// Effective configuration for one command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifierConfig {
    /// Custom rule file, if any.
    pub rules_file: Option<PathBuf>,
    /// Label style.
    pub label_style: LabelStyle,
}

impl ClassifierConfig {
    /// Resolves settings file, environment and command-line overrides.
    pub fn resolve(rules_flag: Option<PathBuf>, emphasize_flag: bool) -> Result<Self> {
        let settings = Settings::load()?.apply_env()?;
        Ok(Self::from_settings(settings, rules_flag, emphasize_flag))
    }

    /// Layers command-line flags over already-loaded settings.
    pub fn from_settings(
        settings: Settings,
        rules_flag: Option<PathBuf>,
        emphasize_flag: bool,
    ) -> Self {
        let label_style = if emphasize_flag {
            LabelStyle::Emphasized
        } else {
            settings.label_style.unwrap_or_default()
        };

        Self {
            rules_file: rules_flag.or(settings.rules_file),
            label_style,
        }
    }

    /// Loads the custom rule table, if one is configured.
    ///
    /// `None` means the embedded table applies.
    pub fn load_rules(&self) -> Result<Option<RuleTable>> {
        self.rules_file
            .as_ref()
            .map(|path| {
                RuleTable::load_from_path(path)
                    .with_context(|| format!("Failed to load rules from {}", path.display()))
            })
            .transpose()
    }
}
