//! Error types for kana-lint-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// A config file given explicitly does not exist.
    #[error("config file not found: {0}")]
    MissingFile(Utf8PathBuf),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while selecting lint checks.
///
/// The detectors themselves never fail; only a bad check selection does.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// An unknown check name was requested.
    #[error("unknown check: {name}. Use: {available}")]
    UnknownCheck {
        /// The check name that was requested.
        name: String,
        /// Comma-separated list of available check names.
        available: String,
    },

    /// An `allow` entry names no warning or format flag.
    #[error("unknown flag in allow list: {name}. Use: {available}")]
    UnknownFlag {
        /// The flag label that was given.
        name: String,
        /// Comma-separated list of flag labels that can be allowed.
        available: String,
    },

    /// The check selection contradicts itself.
    #[error("conflicting configuration: {0}")]
    ConflictingConfig(String),
}

/// Result type alias using [`AnalysisError`].
pub type AnalysisResult<T> = Result<T, AnalysisError>;
