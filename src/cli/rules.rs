//! Rule table CLI commands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use super::{render, OutputFormat};
use crate::classifier::rules::LANGUAGES_YAML;
use crate::classifier::{get_rule_table, RuleTable};
use crate::config::ClassifierConfig;
use crate::data::RulesReport;

/// Rule table operations.
#[derive(Parser)]
pub struct RulesCommand {
    /// Rules subcommand to execute.
    #[command(subcommand)]
    pub command: RulesSubcommands,
}

/// Rules subcommands.
#[derive(Subcommand)]
pub enum RulesSubcommands {
    /// Lists the active languages in tie-break order.
    List(ListCommand),
    /// Shows the embedded languages.yaml rule document.
    Show(ShowCommand),
    /// Validates a custom rule document.
    Check(CheckCommand),
}

/// List command options.
#[derive(Parser)]
pub struct ListCommand {
    /// Custom rule file replacing the embedded rules.
    #[arg(long, value_name = "PATH")]
    pub rules: Option<PathBuf>,

    /// Prints every pattern as well as the counts.
    #[arg(long)]
    pub patterns: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Show command options.
#[derive(Parser)]
pub struct ShowCommand {}

/// Check command options.
#[derive(Parser)]
pub struct CheckCommand {
    /// Rule document to validate.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

impl RulesCommand {
    /// Executes the rules command.
    pub fn execute(self) -> Result<()> {
        match self.command {
            RulesSubcommands::List(list_cmd) => list_cmd.execute(),
            RulesSubcommands::Show(show_cmd) => show_cmd.execute(),
            RulesSubcommands::Check(check_cmd) => check_cmd.execute(),
        }
    }
}

impl ListCommand {
    /// Executes the list command.
    pub fn execute(self) -> Result<()> {
        let config = ClassifierConfig::resolve(self.rules.clone(), false)?;
        print!("{}", self.run(&config)?);
        Ok(())
    }

    /// Renders the active rule table.
    pub fn run(&self, config: &ClassifierConfig) -> Result<String> {
        let report = match config.load_rules()? {
            Some(table) => {
                let source = config
                    .rules_file
                    .as_ref()
                    .map_or_else(String::new, |p| p.display().to_string());
                RulesReport::from_table(source, &table, self.patterns)
            }
            None => RulesReport::from_table("embedded", get_rule_table(), self.patterns),
        };
        render(&report, self.format, RulesReport::to_text)
    }
}

impl ShowCommand {
    /// Executes the show command.
    pub fn execute(self) -> Result<()> {
        println!("{LANGUAGES_YAML}");
        Ok(())
    }
}

impl CheckCommand {
    /// Executes the check command.
    pub fn execute(self) -> Result<()> {
        println!("{}", self.run()?);
        Ok(())
    }

    /// Validates the rule file and describes it.
    pub fn run(&self) -> Result<String> {
        let table = RuleTable::load_from_path(&self.file)
            .with_context(|| format!("Invalid rule file: {}", self.file.display()))?;
        Ok(format!(
            "✅ {} is valid: {} languages ({})",
            self.file.display(),
            table.len(),
            table.names().join(", ")
        ))
    }
}
