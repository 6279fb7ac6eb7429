//! CLI interface for snippet-lang.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use crate::data::{to_json, to_yaml};

pub mod detect;
pub mod help;
pub mod rules;

/// snippet-lang: detects the programming language of code snippets.
#[derive(Parser)]
#[command(name = "snippet-lang")]
#[command(about = "Detects the programming language of code snippets", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The main command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Main command categories.
#[derive(Subcommand)]
pub enum Commands {
    /// Detects the language of a file or stdin.
    Detect(detect::DetectCommand),
    /// Rule table inspection and validation.
    Rules(rules::RulesCommand),
    /// Displays comprehensive help for all commands.
    #[command(name = "help-all")]
    HelpAll(help::HelpCommand),
}

impl Cli {
    /// Executes the CLI command.
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Detect(detect_cmd) => detect_cmd.execute(),
            Commands::Rules(rules_cmd) => rules_cmd.execute(),
            Commands::HelpAll(help_cmd) => help_cmd.execute(),
        }
    }
}

/// Report output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// YAML document.
    #[default]
    Yaml,
    /// Pretty-printed JSON.
    Json,
    /// Human-readable text.
    Text,
}

/// Renders a report in the requested format.
pub(crate) fn render<T: Serialize>(
    report: &T,
    format: OutputFormat,
    text: impl FnOnce(&T) -> String,
) -> Result<String> {
    match format {
        OutputFormat::Yaml => to_yaml(report),
        OutputFormat::Json => to_json(report).map(|json| json + "\n"),
        OutputFormat::Text => Ok(text(report)),
    }
}
