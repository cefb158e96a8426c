//! Check command: run every detector and gate on the findings.
//!
//! Settings cascade: command-line flags extend the config file, which
//! extends the defaults.

use anyhow::{Context, bail};
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use kana_lint_core::config::Config;
use kana_lint_core::lint::{self, LintOptions, LintReport};

use super::{describe_chars, formatting, read_input_file};

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// File to check.
    pub file: Utf8PathBuf,

    /// Checks to run (comma-separated). Omit for all checks.
    #[arg(long, value_delimiter = ',')]
    pub checks: Option<Vec<String>>,

    /// Flags that do not fail the check (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub allow: Vec<String>,

    /// Also flag full-width letters and digits.
    #[arg(long)]
    pub full_width_alphanumeric: bool,
}

impl CheckArgs {
    /// Merge these flags over the configured defaults.
    fn options(&self, config: &Config) -> LintOptions {
        let mut options = LintOptions::from(config);
        if self.checks.is_some() {
            options.checks.clone_from(&self.checks);
            options.exclude = None;
        }
        options.allow.extend(self.allow.iter().cloned());
        options.full_width_alphanumeric |= self.full_width_alphanumeric;
        options
    }
}

/// Lint a file and fail when anything not allowed was found.
#[instrument(name = "cmd_check", skip_all, fields(file = %args.file))]
pub fn cmd_check(
    args: CheckArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let options = args.options(config);
    debug!(file = %args.file, ?options, "executing check command");

    let content = read_input_file(&args.file, max_input_bytes)
        .with_context(|| format!("failed to load {}", args.file))?;

    let report = lint::run_lint(args.file.as_str(), &content, &options)
        .with_context(|| format!("failed to check {}", args.file))?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if !report.pass {
        bail!(
            "{} failed checks: {}",
            args.file,
            report.failures.join(", ")
        );
    }

    Ok(())
}

fn print_report(report: &LintReport) {
    println!("{}", report.file.bold());

    if let Some(ref l) = report.language {
        println!(
            "  {} punctuation [{}], text [{}]",
            "language:".cyan(),
            l.punctuation_langs.join(", "),
            l.text_langs.join(", "),
        );
        if !l.all_known() {
            println!(
                "  {} {} unknown: {}",
                "language:".cyan(),
                "FAIL".red(),
                describe_chars(&l.unknown_chars)
            );
        }
    }

    if let Some(ref i) = report.issues {
        for issue in &i.issues {
            let status = if report.failures.contains(&issue.flag) {
                "FAIL".red().to_string()
            } else {
                "ALLOW".dimmed().to_string()
            };
            println!(
                "  {} {} {}: {}",
                "issues:".cyan(),
                status,
                issue.flag,
                describe_chars(&issue.chars)
            );
        }
    }

    if let Some(ref f) = report.formatting {
        for (flag, line) in f.flags().into_iter().zip(formatting::describe(f)) {
            let status = if report.failures.iter().any(|failure| failure == flag) {
                "FAIL".red().to_string()
            } else {
                "ALLOW".dimmed().to_string()
            };
            println!("  {} {} {}", "formatting:".cyan(), status, line);
        }
    }

    if report.pass {
        println!("  {}", "PASS".green());
    }
}
