//! Language command: which scripts a file uses.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use kana_lint_core::script;

use super::{describe_chars, read_input_file};

/// Arguments for the `language` subcommand.
#[derive(Args, Debug)]
pub struct LanguageArgs {
    /// File to analyze.
    pub file: Utf8PathBuf,
}

/// Report the punctuation and text scripts of a file, plus unknown characters.
///
/// Informational only: unknown characters are printed, not treated as failure.
#[instrument(name = "cmd_language", skip_all, fields(file = %args.file))]
pub fn cmd_language(
    args: LanguageArgs,
    global_json: bool,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, "executing language command");

    let content = read_input_file(&args.file, max_input_bytes)
        .with_context(|| format!("failed to load {}", args.file))?;
    let report = script::detect_language(&content);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", args.file.bold());
    println!(
        "  {} {}",
        "Punctuation language(s):".cyan(),
        list_or_none(&report.punctuation_langs)
    );
    println!(
        "  {} {}",
        "Text language(s):".cyan(),
        list_or_none(&report.text_langs)
    );
    if !report.all_known() {
        println!(
            "  {} {}",
            "Unknown characters:".yellow(),
            describe_chars(&report.unknown_chars)
        );
    }

    Ok(())
}

fn list_or_none(labels: &[String]) -> String {
    if labels.is_empty() {
        "(none)".to_string()
    } else {
        labels.join(", ")
    }
}
