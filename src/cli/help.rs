//! `help-all`: the help of every command in one document.
//!
//! Each section is clap's rendered help under a `snippet-lang <path> - <about>`
//! header. The root section ends with the settings locations and environment
//! variables, and the `detect` and `rules` sections end with the embedded
//! languages in tie-break order.

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Command, CommandFactory, Parser};

use crate::classifier::label::display_name;
use crate::classifier::{get_rule_table, RuleTable};
use crate::config::{Settings, LABEL_STYLE_ENV, RULES_ENV};

const SECTION_WIDTH: usize = 80;

/// Help command for displaying comprehensive usage information.
#[derive(Parser)]
pub struct HelpCommand {}

/// Renders the full command tree of the CLI.
pub struct HelpGenerator {
    app: Command,
}

impl HelpGenerator {
    /// Creates a generator for the `snippet-lang` command tree.
    pub fn new() -> Self {
        Self {
            app: crate::cli::Cli::command(),
        }
    }

    /// Renders every command, parents before children and siblings sorted
    /// by name.
    pub fn generate_all_help(&self) -> String {
        let mut sections = Vec::new();
        walk(&self.app, &mut Vec::new(), &mut sections);

        let separator = format!("\n\n{}\n\n", "=".repeat(SECTION_WIDTH));
        sections.join(&separator)
    }
}

impl Default for HelpGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn walk<'a>(cmd: &'a Command, path: &mut Vec<&'a str>, sections: &mut Vec<String>) {
    sections.push(section(cmd, path));

    let mut children: Vec<&Command> = cmd
        .get_subcommands()
        .filter(|c| c.get_name() != "help")
        .collect();
    children.sort_by(|a, b| a.get_name().cmp(b.get_name()));

    for child in children {
        path.push(child.get_name());
        walk(child, path, sections);
        path.pop();
    }
}

fn section(cmd: &Command, path: &[&str]) -> String {
    let title = std::iter::once("snippet-lang")
        .chain(path.iter().copied())
        .collect::<Vec<_>>()
        .join(" ");
    let about = cmd
        .get_about()
        .map_or_else(|| "No description available".to_string(), ToString::to_string);

    let mut out = format!("{title} - {about}\n\n{}", cmd.clone().render_help());
    match path.first().copied() {
        None => out.push_str(&configuration_footer()),
        Some("detect" | "rules") => out.push_str(&languages_footer(get_rule_table())),
        Some(_) => {}
    }
    out
}

/// Lists the languages of `table` with their display names.
fn languages_footer(table: &RuleTable) -> String {
    let mut out = String::from("\nLanguages (tie-break order):\n");
    for name in table.names() {
        out.push_str(&format!("  {name:<12} {}\n", display_name(name)));
    }
    out
}

fn configuration_footer() -> String {
    let paths = Settings::settings_paths_from(
        Some(OsString::from("$XDG_CONFIG_HOME")),
        Some(PathBuf::from("~")),
    );

    let mut out = String::from("\nSettings files (first found wins):\n");
    for path in paths {
        out.push_str(&format!("  {}\n", path.display()));
    }
    out.push_str("\nEnvironment:\n");
    out.push_str(&format!("  {RULES_ENV:<26} custom rule file\n"));
    out.push_str(&format!("  {LABEL_STYLE_ENV:<26} plain | emphasized\n"));
    out
}

impl HelpCommand {
    /// Prints the help of every command.
    pub fn execute(self) -> Result<()> {
        println!("{}", HelpGenerator::new().generate_all_help());
        Ok(())
    }
}
