//! Convert command: full-width / half-width transliteration.
//!
//! Never edits the input in place: the converted copy goes to `--output` or
//! stdout for a human to review.

use std::io::Write;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, info, instrument};

use kana_lint_core::width::Width;

use super::read_input_file;

/// Arguments for the `convert` subcommand.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// File to convert.
    pub file: Utf8PathBuf,

    /// Target width.
    #[arg(long, value_enum)]
    pub to: Width,

    /// Write the converted text here instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<Utf8PathBuf>,
}

#[derive(Serialize)]
struct ConvertOutput<'a> {
    to: Width,
    changed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
}

/// Convert a file's character widths.
#[instrument(name = "cmd_convert", skip_all, fields(file = %args.file, to = %args.to))]
pub fn cmd_convert(
    args: ConvertArgs,
    global_json: bool,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, to = %args.to, "executing convert command");

    let content = read_input_file(&args.file, max_input_bytes)
        .with_context(|| format!("failed to load {}", args.file))?;
    let converted = args.to.convert(&content);
    let changed = count_changed(&content, &converted);
    debug!(changed, "conversion complete");

    if let Some(ref output) = args.output {
        std::fs::write(output.as_std_path(), &converted)
            .with_context(|| format!("failed to write {output}"))?;
        info!(output = %output, changed, "wrote converted text");
    }

    if global_json {
        let out = ConvertOutput {
            to: args.to,
            changed,
            output: args.output.as_ref().map(|p| p.as_str()),
            text: args.output.is_none().then_some(converted.as_str()),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if let Some(ref output) = args.output {
        println!(
            "{} {changed} character(s) converted to {}-width, wrote proposed changes to {}",
            "OK:".green(),
            args.to,
            output.cyan()
        );
    } else {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(converted.as_bytes())
            .context("failed to write to stdout")?;
        stdout.flush().context("failed to write to stdout")?;
    }

    Ok(())
}

/// Number of characters that differ between the input and the converted copy.
fn count_changed(before: &str, after: &str) -> usize {
    before
        .chars()
        .zip(after.chars())
        .filter(|(a, b)| a != b)
        .count()
}
