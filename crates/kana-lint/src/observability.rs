//! Logging setup.
//!
//! Human-readable events go to stderr. When a log location is known, the same
//! events are also written as JSONL through a non-blocking file appender.
//!
//! Log location precedence: `KANA_LINT_LOG_PATH` (exact file) >
//! `KANA_LINT_LOG_DIR` > config `log_dir` > the platform data directory.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_PATH_ENV: &str = "KANA_LINT_LOG_PATH";
const LOG_DIR_ENV: &str = "KANA_LINT_LOG_DIR";
const LOG_FILE_NAME: &str = "kana-lint.jsonl";

/// Where log files go.
#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    /// Exact log file path.
    pub log_path: Option<PathBuf>,
    /// Directory for `kana-lint.jsonl`.
    pub log_dir: Option<PathBuf>,
    /// Whether the location came from the user rather than platform defaults.
    pub explicit: bool,
}

impl ObservabilityConfig {
    /// Read the environment, falling back to `config_log_dir` and then the
    /// platform data directory.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        let log_path = std::env::var_os(LOG_PATH_ENV).map(PathBuf::from);
        let log_dir = std::env::var_os(LOG_DIR_ENV)
            .map(PathBuf::from)
            .or(config_log_dir);
        let explicit = log_path.is_some() || log_dir.is_some();

        let log_dir = log_dir.or_else(|| {
            kana_lint_core::config::user_data_local_dir()
                .map(|dir| dir.join("logs").into_std_path_buf())
        });

        Self {
            log_path,
            log_dir,
            explicit,
        }
    }

    /// The directory and file name of the JSONL log, if any.
    fn file_target(&self) -> Option<(PathBuf, PathBuf)> {
        if let Some(ref path) = self.log_path {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
            let file = PathBuf::from(path.file_name()?);
            return Some((dir, file));
        }
        self.log_dir
            .as_ref()
            .map(|dir| (dir.clone(), PathBuf::from(LOG_FILE_NAME)))
    }
}

/// Build the event filter.
///
/// `RUST_LOG` wins when set. Otherwise `--quiet` means errors only and each
/// `-v` raises the level one step above the configured default.
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => default_level,
            1 => "debug",
            _ => "trace",
        }
    };
    EnvFilter::new(level)
}

/// Keeps the file writer alive; drop it last so buffered events are flushed.
#[must_use]
pub struct ObservabilityGuard {
    _file: Option<WorkerGuard>,
}

/// Install the global subscriber.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<ObservabilityGuard> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let (file_layer, guard) = match open_log_dir(config)? {
        Some((dir, file)) => {
            let appender = tracing_appender::rolling::never(dir, file);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_span_events(FmtSpan::CLOSE);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    Ok(ObservabilityGuard { _file: guard })
}

/// Make sure the log directory exists.
///
/// A directory the user asked for must be creatable; the platform default is
/// skipped quietly when it is not.
fn open_log_dir(config: &ObservabilityConfig) -> anyhow::Result<Option<(PathBuf, PathBuf)>> {
    let Some((dir, file)) = config.file_target() else {
        return Ok(None);
    };
    match std::fs::create_dir_all(&dir) {
        Ok(()) => Ok(Some((dir, file))),
        Err(err) if config.explicit => {
            Err(err).with_context(|| format!("failed to create log directory {}", dir.display()))
        }
        Err(_) => Ok(None),
    }
}
