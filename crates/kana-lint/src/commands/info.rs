//! Info command: version, config files in effect, and the merged settings.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use kana_lint_core::config::{self, Config, ConfigSources};
use kana_lint_core::lint;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    // No subcommand-specific arguments; uses global --json flag
}

#[derive(Serialize)]
struct Info<'a> {
    name: &'static str,
    version: &'static str,
    config_files: Vec<&'a Utf8Path>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_config_dir: Option<Utf8PathBuf>,
    input_limit: Option<usize>,
    allowable_flags: Vec<&'static str>,
    config: &'a Config,
}

impl<'a> Info<'a> {
    fn new(config: &'a Config, sources: &'a ConfigSources) -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            config_files: sources.files().collect(),
            user_config_dir: config::user_config_dir(),
            input_limit: config.input_limit(),
            allowable_flags: lint::allowable_flags(),
            config,
        }
    }
}

/// Print the version and the effective configuration.
#[instrument(name = "cmd_info", skip_all)]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing info command");
    let info = Info::new(config, sources);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{} {}", info.name.bold(), info.version.green());

    println!();
    println!("{}", "Config files".bold().underline());
    if info.config_files.is_empty() {
        println!("  {}", "(none loaded)".dimmed());
    }
    for file in &info.config_files {
        println!("  {}", file.cyan());
    }
    if let Some(ref dir) = info.user_config_dir {
        println!("  {} {}", "user config dir:".dimmed(), dir);
    }

    println!();
    println!("{}", "Settings".bold().underline());
    println!("  {} {}", "checks:".dimmed(), selection(config));
    println!("  {} {}", "allow:".dimmed(), list_or_none(config.allow.as_deref()));
    println!(
        "  {} {}",
        "full-width alphanumeric:".dimmed(),
        if config.full_width_alphanumeric { "on" } else { "off" }
    );
    match info.input_limit {
        Some(bytes) => println!("  {} {bytes} bytes", "input limit:".dimmed()),
        None => println!("  {} {}", "input limit:".dimmed(), "disabled".yellow()),
    }
    println!("  {} {}", "log level:".dimmed(), config.log_level.as_str());

    println!();
    println!(
        "{} {}",
        "Allowable flags:".dimmed(),
        info.allowable_flags.join(", ")
    );

    Ok(())
}

/// Which checks `check` will run, in words.
fn selection(config: &Config) -> String {
    match (&config.checks, &config.exclude) {
        (Some(checks), _) => checks.join(", "),
        (None, Some(exclude)) if !exclude.is_empty() => format!("all except {}", exclude.join(", ")),
        _ => "all".to_string(),
    }
}

fn list_or_none(values: Option<&[String]>) -> String {
    match values {
        Some(v) if !v.is_empty() => v.join(", "),
        _ => "(none)".to_string(),
    }
}
