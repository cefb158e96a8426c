//! Formatting command: stray newlines and spaces.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use kana_lint_core::format::{self, FormattingReport};

use super::read_input_file;

/// Arguments for the `formatting` subcommand.
#[derive(Args, Debug)]
pub struct FormattingArgs {
    /// File to check.
    pub file: Utf8PathBuf,
}

/// Report newline and space irregularities in a file.
#[instrument(name = "cmd_formatting", skip_all, fields(file = %args.file))]
pub fn cmd_formatting(
    args: FormattingArgs,
    global_json: bool,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, "executing formatting command");

    let content = read_input_file(&args.file, max_input_bytes)
        .with_context(|| format!("failed to load {}", args.file))?;
    let report = format::detect_formatting(&content);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", args.file.bold());
    if report.is_clean() {
        println!("  {} no formatting issues", "PASS:".green());
    }
    for line in describe(&report) {
        println!("  {}", line.yellow());
    }

    Ok(())
}

/// One human-readable line per raised flag.
pub(crate) fn describe(report: &FormattingReport) -> Vec<&'static str> {
    let mut lines = Vec::new();
    if report.leading_or_trailing_newline {
        lines.push("Detected start/end newline.");
    }
    if report.triple_newline {
        lines.push("Detected double blank lines (three newlines in a row).");
    }
    if report.contains_space {
        lines.push("Detected spaces.");
    }
    lines
}
