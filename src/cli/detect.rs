//! Language detection command.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use super::{render, OutputFormat};
use crate::classifier::{get_rule_table, Classifier};
use crate::config::ClassifierConfig;
use crate::data::DetectionReport;

/// Detect command options.
#[derive(Parser)]
pub struct DetectCommand {
    /// File to classify; reads stdin when omitted or `-`.
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,

    /// Includes every positively scoring candidate in the report.
    #[arg(long)]
    pub rank: bool,

    /// Custom rule file replacing the embedded rules.
    #[arg(long, value_name = "PATH")]
    pub rules: Option<PathBuf>,

    /// Uses the emphasized label style.
    #[arg(long)]
    pub emphasize: bool,

    /// Adds the snippet-lang version to the report.
    #[arg(long)]
    pub versions: bool,
}

impl DetectCommand {
    /// Executes the detect command.
    pub fn execute(self) -> Result<()> {
        let config = ClassifierConfig::resolve(self.rules.clone(), self.emphasize)?;
        let (input, text) = read_input(self.file.as_deref())?;
        let output = self.run(&config, &input, &text)?;
        print!("{output}");
        Ok(())
    }

    /// Classifies `text` and renders the report.
    pub fn run(&self, config: &ClassifierConfig, input: &str, text: &str) -> Result<String> {
        let custom = config.load_rules()?;
        let table = match &custom {
            Some(table) => table,
            None => get_rule_table(),
        };
        let classifier = Classifier::with_table(table).with_label_style(config.label_style);
        let mut report = detect(classifier, input, text, self.rank);
        if self.versions {
            report = report.with_versions();
        }
        render(&report, self.format, DetectionReport::to_text)
    }
}

/// Builds a detection report for `text`.
pub fn detect(classifier: Classifier<'_>, input: &str, text: &str, rank: bool) -> DetectionReport {
    let report = DetectionReport::new(input, classifier.classify(text));
    debug!(input, language = %report.language, "Detected language");
    if rank {
        report.with_candidates(classifier.rank(text))
    } else {
        report
    }
}

/// Reads the snippet from `file`, or stdin when `None` or `-`.
fn read_input(file: Option<&Path>) -> Result<(String, String)> {
    read_input_from(file, io::stdin().lock())
}

/// Reads the snippet from `file`, or from `stdin` when `None` or `-`.
///
/// Invalid UTF-8 is replaced rather than rejected.
fn read_input_from<R: Read>(file: Option<&Path>, mut stdin: R) -> Result<(String, String)> {
    let mut bytes = Vec::new();
    let input = match file {
        Some(path) if path != Path::new("-") => {
            bytes = fs::read(path)
                .with_context(|| format!("Failed to read input file: {}", path.display()))?;
            path.display().to_string()
        }
        _ => {
            stdin
                .read_to_end(&mut bytes)
                .context("Failed to read stdin")?;
            "stdin".to_string()
        }
    };

    Ok((input, String::from_utf8_lossy(&bytes).into_owned()))
}
