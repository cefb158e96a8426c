//! Issues command: rare, obsolete and legacy-encoded characters.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use kana_lint_core::ranges::{OPTIONAL_WARNING, WARNING};
use kana_lint_core::style;

use super::{describe_chars, read_input_file};

/// Arguments for the `issues` subcommand.
#[derive(Args, Debug)]
pub struct IssuesArgs {
    /// File to audit.
    pub file: Utf8PathBuf,

    /// Also flag full-width letters and digits.
    #[arg(long)]
    pub full_width_alphanumeric: bool,
}

/// List the warning categories a file triggers.
#[instrument(name = "cmd_issues", skip_all, fields(file = %args.file))]
pub fn cmd_issues(
    args: IssuesArgs,
    global_json: bool,
    config_full_width_alphanumeric: bool,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let full_width = args.full_width_alphanumeric || config_full_width_alphanumeric;
    debug!(file = %args.file, full_width, "executing issues command");

    let content = read_input_file(&args.file, max_input_bytes)
        .with_context(|| format!("failed to load {}", args.file))?;
    let report = if full_width {
        style::detect_issues_in(&content, &[WARNING, OPTIONAL_WARNING])
    } else {
        style::detect_issues(&content)
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", args.file.bold());
    if report.is_empty() {
        println!("  {} no possible violations", "PASS:".green());
        return Ok(());
    }
    for issue in &report.issues {
        println!(
            "  {} {}",
            format!("{}:", issue.flag).yellow(),
            describe_chars(&issue.chars)
        );
    }

    Ok(())
}
