//! kana-lint CLI
#![deny(unsafe_code)]

use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use camino::Utf8PathBuf;
use clap::Parser;
use kana_lint::{Cli, Commands, commands};
use kana_lint_core::config::{Config, ConfigLoader, ConfigSources};
use tracing::debug;

mod observability;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.color.apply();

    if cli.version_only {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // arg_required_else_help ensures we have --version-only or a subcommand
    let Some(command) = cli.command else {
        return Ok(());
    };

    if let Some(ref dir) = cli.chdir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("failed to change directory to {}", dir.display()))?;
    }

    let (config, sources) =
        load_config(cli.config.as_deref()).context("failed to load configuration")?;

    let _guard = observability::init_observability(
        &observability::ObservabilityConfig::from_env_with_overrides(
            config.log_dir.clone().map(Utf8PathBuf::into_std_path_buf),
        ),
        observability::env_filter(cli.quiet, cli.verbose, config.log_level.as_str()),
    )
    .context("failed to initialize logging")?;

    debug!(
        config_files = sources.files().count(),
        input_limit = ?config.input_limit(),
        json = cli.json,
        "CLI initialized"
    );

    let result = dispatch(command, cli.json, &config, &sources);
    if let Err(ref err) = result {
        tracing::error!(error = %err, "fatal error");
    }
    result
}

/// Discover config from the working directory, plus `--config` if given.
fn load_config(explicit: Option<&Path>) -> anyhow::Result<(Config, ConfigSources)> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let mut loader = ConfigLoader::new().search_from(utf8(cwd, "current directory")?);
    if let Some(path) = explicit {
        loader = loader.with_file(utf8(path.to_path_buf(), "config path")?);
    }
    Ok(loader.load()?)
}

fn utf8(path: PathBuf, what: &str) -> anyhow::Result<Utf8PathBuf> {
    Utf8PathBuf::try_from(path)
        .map_err(|e| anyhow!("{what} is not valid UTF-8: {}", e.into_path_buf().display()))
}

fn dispatch(
    command: Commands,
    json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    let limit = config.input_limit();
    match command {
        Commands::Check(args) => commands::check::cmd_check(args, json, config, limit),
        Commands::Language(args) => commands::language::cmd_language(args, json, limit),
        Commands::Issues(args) => {
            commands::issues::cmd_issues(args, json, config.full_width_alphanumeric, limit)
        }
        Commands::Formatting(args) => commands::formatting::cmd_formatting(args, json, limit),
        Commands::Convert(args) => commands::convert::cmd_convert(args, json, limit),
        Commands::Ranges(args) => commands::ranges::cmd_ranges(args, json),
        Commands::Info(args) => commands::info::cmd_info(args, json, config, sources),
    }
}
