//! Configuration loading and discovery.
//!
//! Sources, lowest precedence first:
//! 1. Built-in defaults
//! 2. The user config, `config.<ext>` in the platform config directory
//! 3. Project files in the closest directory (walking up from the working
//!    directory, stopping at a `.git` root) that holds any of `.kana.<ext>`,
//!    `kana.<ext>`, `.kana-lint.<ext>`, `kana-lint.<ext>`
//! 4. Files passed explicitly (`--config`), which must exist
//! 5. `KANA_LINT_*` environment variables
//!
//! `<ext>` is `toml`, `yaml`, `yml` or `json`. Every project file found in
//! that one directory is merged, in the order listed above and by extension
//! within each name.
//!
//! # Example
//! ```no_run
//! use camino::Utf8Path;
//! use kana_lint_core::config::ConfigLoader;
//!
//! let (config, sources) = ConfigLoader::new()
//!     .search_from(Utf8Path::new("lyrics/2024"))
//!     .load()
//!     .unwrap();
//! println!("{} file(s), allow = {:?}", sources.files().count(), config.allow);
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Settings for kana-lint.
///
/// The detectors never read it. It only steers which checks the CLI runs,
/// which findings fail a lint, and how the process logs.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Log level when neither `RUST_LOG` nor `-q`/`-v` is given.
    pub log_level: LogLevel,
    /// Directory for JSONL log files.
    pub log_dir: Option<Utf8PathBuf>,
    /// Largest file, in bytes, a command will read. Defaults to 5 MiB.
    pub max_input_bytes: Option<usize>,
    /// Read files of any size; `max_input_bytes` is ignored.
    pub disable_input_limit: bool,
    /// Checks for `check` to run (language, issues, formatting). Omit for all.
    pub checks: Option<Vec<String>>,
    /// Checks for `check` to skip. Cannot be combined with `checks`.
    pub exclude: Option<Vec<String>>,
    /// Warning or format flags that do not fail `check`.
    ///
    /// Plain-text files usually end with a newline, so
    /// `leading_or_trailing_newline` is a common entry.
    pub allow: Option<Vec<String>>,
    /// Also warn about full-width letters and digits.
    pub full_width_alphanumeric: bool,
}

impl Config {
    /// The input size limit commands should enforce, if any.
    pub fn input_limit(&self) -> Option<usize> {
        if self.disable_input_limit {
            None
        } else {
            Some(self.max_input_bytes.unwrap_or(crate::DEFAULT_MAX_INPUT_BYTES))
        }
    }
}

/// Log level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Every span and event.
    Trace,
    /// Detector and loader internals.
    Debug,
    /// Files written and similar milestones (default).
    #[default]
    Info,
    /// Only problems.
    Warn,
    /// Only failures.
    Error,
}

impl LogLevel {
    /// Returns the log level as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// The config files that went into a [`Config`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// User config file, if one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Utf8PathBuf>,
    /// Project files from the closest directory that had any.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project: Vec<Utf8PathBuf>,
    /// Files named on the command line.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explicit: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// Every loaded file, lowest precedence first.
    pub fn files(&self) -> impl Iterator<Item = &Utf8Path> {
        self.user
            .iter()
            .chain(&self.project)
            .chain(&self.explicit)
            .map(Utf8PathBuf::as_path)
    }
}

const EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

/// Base names of project config files, lowest precedence first.
const PROJECT_NAMES: &[&str] = &[".kana", "kana", ".kana-lint", "kana-lint"];

/// Directory entry that marks a project root; discovery never goes above it.
const ROOT_MARKER: &str = ".git";

const APP_NAME: &str = "kana-lint";

const ENV_PREFIX: &str = "KANA_LINT_";

/// Collects config sources and merges them into a [`Config`].
#[derive(Debug)]
pub struct ConfigLoader {
    search_from: Option<Utf8PathBuf>,
    user_config: bool,
    explicit: Vec<Utf8PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// A loader that reads the user config and nothing else.
    pub const fn new() -> Self {
        Self {
            search_from: None,
            user_config: true,
            explicit: Vec::new(),
        }
    }

    /// Discover project files starting at `dir`.
    pub fn search_from(mut self, dir: impl AsRef<Utf8Path>) -> Self {
        self.search_from = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Skip the user config. Tests use this to stay hermetic.
    pub const fn without_user_config(mut self) -> Self {
        self.user_config = false;
        self
    }

    /// Merge `path` after the discovered files. Later calls win.
    pub fn with_file(mut self, path: impl AsRef<Utf8Path>) -> Self {
        self.explicit.push(path.as_ref().to_path_buf());
        self
    }

    /// Merge every source.
    ///
    /// Fails when an explicit file is missing or any source does not
    /// deserialize.
    #[tracing::instrument(skip(self), fields(search_from = ?self.search_from))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        let sources = ConfigSources {
            user: if self.user_config {
                user_config_file()
            } else {
                None
            },
            project: self
                .search_from
                .as_deref()
                .map(discover_project_files)
                .unwrap_or_default(),
            explicit: self.explicit,
        };

        if let Some(missing) = sources.explicit.iter().find(|path| !path.is_file()) {
            return Err(ConfigError::MissingFile(missing.clone()));
        }

        let figment = sources
            .files()
            .fold(Figment::from(Serialized::defaults(Config::default())), merge_file)
            .merge(Env::prefixed(ENV_PREFIX).lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        tracing::debug!(
            files = sources.files().count(),
            log_level = config.log_level.as_str(),
            "configuration loaded"
        );
        Ok((config, sources))
    }
}

/// Config files in the closest directory at or above `start` that has any.
fn discover_project_files(start: &Utf8Path) -> Vec<Utf8PathBuf> {
    for dir in start.ancestors() {
        let found: Vec<Utf8PathBuf> = PROJECT_NAMES
            .iter()
            .flat_map(|name| EXTENSIONS.iter().map(move |ext| dir.join(format!("{name}.{ext}"))))
            .filter(|path| path.is_file())
            .collect();
        if !found.is_empty() {
            tracing::debug!(dir = %dir, count = found.len(), "found project config");
            return found;
        }
        if dir.join(ROOT_MARKER).exists() {
            break;
        }
    }
    Vec::new()
}

fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
    match path.extension() {
        Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_str())),
        Some("json") => figment.merge(Json::file_exact(path.as_str())),
        _ => figment.merge(Toml::file_exact(path.as_str())),
    }
}

fn user_config_file() -> Option<Utf8PathBuf> {
    let dir = user_config_dir()?;
    EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("config.{ext}")))
        .find(|path| path.is_file())
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", APP_NAME)
}

/// Where the user config lives, e.g. `~/.config/kana-lint/` on Linux.
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(project_dirs()?.config_dir().to_path_buf()).ok()
}

/// Machine-local data directory, e.g. `~/.local/share/kana-lint/` on Linux.
pub fn user_data_local_dir() -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(project_dirs()?.data_local_dir().to_path_buf()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serializes tests that mutate environment variables via `set_var`/`remove_var`.
    static TEST_ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn utf8(path: &std::path::Path) -> Utf8PathBuf {
        Utf8PathBuf::try_from(path.to_path_buf()).unwrap()
    }

    /// Load while holding the env lock so a concurrent env test can't leak in.
    fn load(loader: ConfigLoader) -> ConfigResult<(Config, ConfigSources)> {
        let _lock = TEST_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        loader.load()
    }

    fn discover(dir: &std::path::Path) -> (Config, ConfigSources) {
        load(ConfigLoader::new().without_user_config().search_from(utf8(dir))).unwrap()
    }

    fn load_file(contents: &str, name: &str) -> Config {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(name);
        fs::write(&path, contents).unwrap();
        load(ConfigLoader::new().without_user_config().with_file(utf8(&path)))
            .unwrap()
            .0
    }

    #[test]
    fn defaults_lint_everything_with_no_allowances() {
        let config = Config::default();
        assert!(config.checks.is_none());
        assert!(config.exclude.is_none());
        assert!(config.allow.is_none());
        assert!(!config.full_width_alphanumeric);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn input_limit_defaults_and_overrides() {
        assert_eq!(
            Config::default().input_limit(),
            Some(crate::DEFAULT_MAX_INPUT_BYTES)
        );
        let config = Config {
            max_input_bytes: Some(64),
            ..Default::default()
        };
        assert_eq!(config.input_limit(), Some(64));
        let config = Config {
            max_input_bytes: Some(64),
            disable_input_limit: true,
            ..Default::default()
        };
        assert_eq!(config.input_limit(), None);
    }

    #[test]
    fn lint_settings_from_toml() {
        let config = load_file(
            "allow = [\"leading_or_trailing_newline\", \"iteration_marks\"]\n\
             exclude = [\"formatting\"]\n\
             full_width_alphanumeric = true\n",
            "settings.toml",
        );
        assert_eq!(
            config.allow,
            Some(vec![
                "leading_or_trailing_newline".to_string(),
                "iteration_marks".to_string()
            ])
        );
        assert_eq!(config.exclude, Some(vec!["formatting".to_string()]));
        assert!(config.checks.is_none());
        assert!(config.full_width_alphanumeric);
    }

    #[test]
    fn lint_settings_from_json() {
        let config = load_file(r#"{"checks": ["language", "issues"]}"#, "settings.json");
        assert_eq!(
            config.checks,
            Some(vec!["language".to_string(), "issues".to_string()])
        );
    }

    #[test]
    fn lint_settings_from_yaml() {
        let config = load_file(
            "allow:\n  - contains_space\nfull_width_alphanumeric: true\n",
            "settings.yml",
        );
        assert_eq!(config.allow, Some(vec!["contains_space".to_string()]));
        assert!(config.full_width_alphanumeric);
    }

    #[test]
    fn serde_yaml_accepts_partial_config() {
        let config: Config = serde_yaml::from_str("max_input_bytes: 2048\n").unwrap();
        assert_eq!(config.max_input_bytes, Some(2048));
        assert!(config.allow.is_none());
        assert!(!config.full_width_alphanumeric);
        assert!(!config.disable_input_limit);
    }

    #[test]
    fn later_explicit_file_wins() {
        let tmp = TempDir::new().unwrap();
        let base = tmp.path().join("base.toml");
        let extra = tmp.path().join("extra.toml");
        fs::write(&base, "allow = [\"triple_newline\"]\nfull_width_alphanumeric = true\n").unwrap();
        fs::write(&extra, "allow = [\"contains_space\"]\n").unwrap();

        let (config, sources) = load(
            ConfigLoader::new()
                .without_user_config()
                .with_file(utf8(&base))
                .with_file(utf8(&extra)),
        )
        .unwrap();

        assert_eq!(config.allow, Some(vec!["contains_space".to_string()]));
        assert!(config.full_width_alphanumeric);
        assert_eq!(sources.files().count(), 2);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let missing = utf8(&tmp.path().join("nope.toml"));

        let result = load(ConfigLoader::new().without_user_config().with_file(&missing));

        assert!(matches!(result, Err(ConfigError::MissingFile(path)) if path == missing));
    }

    #[test]
    fn wrong_type_is_a_deserialize_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.toml");
        fs::write(&path, "full_width_alphanumeric = \"sometimes\"\n").unwrap();

        let result = load(ConfigLoader::new().without_user_config().with_file(utf8(&path)));

        assert!(matches!(result, Err(ConfigError::Deserialize(_))));
    }

    #[test]
    fn discovery_walks_up_to_closest_project_file() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("album").join("disc1");
        fs::create_dir_all(&nested).unwrap();
        fs::write(tmp.path().join(".kana-lint.toml"), "allow = [\"iteration_marks\"]\n").unwrap();

        let (config, sources) = discover(&nested);

        assert_eq!(config.allow, Some(vec!["iteration_marks".to_string()]));
        assert_eq!(sources.project.len(), 1);
    }

    #[test]
    fn only_closest_directory_contributes() {
        let tmp = TempDir::new().unwrap();
        let child = tmp.path().join("child");
        fs::create_dir_all(&child).unwrap();
        fs::write(tmp.path().join(".kana.toml"), "full_width_alphanumeric = true\n").unwrap();
        fs::write(child.join("kana.json"), r#"{"exclude": ["formatting"]}"#).unwrap();

        let (config, sources) = discover(&child);

        assert!(!config.full_width_alphanumeric);
        assert_eq!(config.exclude, Some(vec!["formatting".to_string()]));
        assert_eq!(sources.project.len(), 1);
    }

    #[test]
    fn root_marker_stops_discovery() {
        let tmp = TempDir::new().unwrap();
        let repo = tmp.path().join("repo");
        let work = repo.join("lyrics");
        fs::create_dir_all(&work).unwrap();
        fs::create_dir(repo.join(".git")).unwrap();
        fs::write(tmp.path().join(".kana-lint.toml"), "full_width_alphanumeric = true\n").unwrap();

        let (config, sources) = discover(&work);

        assert!(!config.full_width_alphanumeric);
        assert!(sources.project.is_empty());
    }

    #[test]
    fn config_beside_root_marker_is_found() {
        let tmp = TempDir::new().unwrap();
        let work = tmp.path().join("lyrics");
        fs::create_dir_all(&work).unwrap();
        fs::create_dir(tmp.path().join(".git")).unwrap();
        fs::write(tmp.path().join("kana-lint.yaml"), "allow: [triple_newline]\n").unwrap();

        let (config, _sources) = discover(&work);

        assert_eq!(config.allow, Some(vec!["triple_newline".to_string()]));
    }

    #[test]
    fn project_names_merge_in_precedence_order() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".kana.toml"), "allow = [\"triple_newline\"]\nchecks = [\"issues\"]\n").unwrap();
        fs::write(tmp.path().join(".kana-lint.toml"), "checks = [\"language\"]\n").unwrap();
        fs::write(tmp.path().join("kana-lint.json"), r#"{"full_width_alphanumeric": true}"#).unwrap();

        let (config, sources) = discover(tmp.path());

        assert_eq!(config.allow, Some(vec!["triple_newline".to_string()]));
        assert_eq!(config.checks, Some(vec!["language".to_string()]));
        assert!(config.full_width_alphanumeric);
        let names: Vec<&str> = sources.project.iter().filter_map(|p| p.file_name()).collect();
        assert_eq!(names, [".kana.toml", ".kana-lint.toml", "kana-lint.json"]);
    }

    #[test]
    fn explicit_file_overrides_project_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".kana-lint.toml"), "checks = [\"issues\"]\n").unwrap();
        let explicit = tmp.path().join("release.toml");
        fs::write(&explicit, "checks = [\"language\", \"issues\"]\n").unwrap();

        let (config, sources) = load(
            ConfigLoader::new()
                .without_user_config()
                .search_from(utf8(tmp.path()))
                .with_file(utf8(&explicit)),
        )
        .unwrap();

        assert_eq!(
            config.checks,
            Some(vec!["language".to_string(), "issues".to_string()])
        );
        assert_eq!(sources.files().last(), Some(utf8(&explicit).as_path()));
    }

    #[test]
    fn user_config_dir_names_the_app() {
        if let Some(path) = user_config_dir() {
            assert!(path.as_str().contains(APP_NAME));
        }
    }

    #[test]
    #[allow(unsafe_code)]
    fn env_var_overrides_file_config() {
        let _lock = TEST_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.toml");
        fs::write(&path, "full_width_alphanumeric = false\n").unwrap();

        // SAFETY: Test environment; the mutex serializes env access across tests.
        unsafe {
            std::env::set_var("KANA_LINT_FULL_WIDTH_ALPHANUMERIC", "true");
            std::env::set_var("KANA_LINT_ALLOW", "[contains_space, triple_newline]");
        }

        let result = ConfigLoader::new()
            .without_user_config()
            .with_file(utf8(&path))
            .load();

        // SAFETY: Cleanup after test.
        unsafe {
            std::env::remove_var("KANA_LINT_FULL_WIDTH_ALPHANUMERIC");
            std::env::remove_var("KANA_LINT_ALLOW");
        }

        let (config, _sources) = result.unwrap();
        assert!(config.full_width_alphanumeric);
        assert_eq!(
            config.allow,
            Some(vec!["contains_space".to_string(), "triple_newline".to_string()])
        );
    }
}
