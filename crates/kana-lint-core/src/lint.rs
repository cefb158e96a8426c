//! Lint execution engine.
//!
//! Runs the selected detectors over one text and folds their results into a
//! single pass/fail verdict. Every detector still runs independently; the
//! verdict only decides which findings count.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{AnalysisError, AnalysisResult};
use crate::format::{self, ALL_FORMAT_FLAGS, FormattingReport};
use crate::ranges::{OPTIONAL_WARNING, TableKind, WARNING};
use crate::script::{self, LanguageReport};
use crate::style::{self, IssuesReport};

/// All available check names.
pub const ALL_CHECKS: &[&str] = &["language", "issues", "formatting"];

/// Failure label used when the text has unrecognized characters.
pub const UNKNOWN_CHARS: &str = "unknown_chars";

/// Which checks to run and which findings to tolerate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintOptions {
    /// Checks to run. `None` runs all of them.
    pub checks: Option<Vec<String>>,
    /// Checks to skip. Cannot be combined with `checks`.
    pub exclude: Option<Vec<String>>,
    /// Warning or format flags that do not fail the lint.
    pub allow: Vec<String>,
    /// Also audit the opt-in warning table.
    pub full_width_alphanumeric: bool,
}

impl From<&Config> for LintOptions {
    fn from(config: &Config) -> Self {
        Self {
            checks: config.checks.clone(),
            exclude: config.exclude.clone(),
            allow: config.allow.clone().unwrap_or_default(),
            full_width_alphanumeric: config.full_width_alphanumeric,
        }
    }
}

/// Combined results from all checks run by the lint engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintReport {
    /// The file that was linted.
    pub file: String,
    /// Script detection, if `language` ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<LanguageReport>,
    /// Style audit, if `issues` ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<IssuesReport>,
    /// Formatting audit, if `formatting` ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatting: Option<FormattingReport>,
    /// Findings that failed the lint, after applying the allow list.
    pub failures: Vec<String>,
    /// Overall pass/fail. `true` only if `failures` is empty.
    pub pass: bool,
}

/// Run every check selected by `options` against `content`.
///
/// The `file_path` is used for reporting only.
#[tracing::instrument(skip(content, options), fields(text_len = content.len()))]
pub fn run_lint(
    file_path: &str,
    content: &str,
    options: &LintOptions,
) -> AnalysisResult<LintReport> {
    let enabled = resolve_checks(options)?;
    let allowed = resolve_allow(&options.allow)?;
    let mut failures = Vec::new();

    // --- language ---
    let language = if enabled.contains("language") {
        let report = script::detect_language(content);
        if !report.all_known() {
            failures.push(UNKNOWN_CHARS.to_string());
        }
        Some(report)
    } else {
        None
    };

    // --- issues ---
    let issues = if enabled.contains("issues") {
        let report = if options.full_width_alphanumeric {
            style::detect_issues_in(content, &[WARNING, OPTIONAL_WARNING])
        } else {
            style::detect_issues(content)
        };
        failures.extend(
            report
                .flags()
                .into_iter()
                .filter(|flag| !allowed.contains(*flag))
                .map(str::to_string),
        );
        Some(report)
    } else {
        None
    };

    // --- formatting ---
    let formatting = if enabled.contains("formatting") {
        let report = format::detect_formatting(content);
        failures.extend(
            report
                .flags()
                .into_iter()
                .filter(|flag| !allowed.contains(*flag))
                .map(str::to_string),
        );
        Some(report)
    } else {
        None
    };

    let pass = failures.is_empty();
    tracing::debug!(file = file_path, pass, failures = failures.len(), "lint complete");

    Ok(LintReport {
        file: file_path.to_string(),
        language,
        issues,
        formatting,
        failures,
        pass,
    })
}

/// Every flag label that an allow list may name.
pub fn allowable_flags() -> Vec<&'static str> {
    [TableKind::Warning, TableKind::OptionalWarning]
        .iter()
        .flat_map(|kind| kind.ranges().iter().map(|range| range.label()))
        .chain(ALL_FORMAT_FLAGS.iter().copied())
        .collect()
}

/// Resolve checks/exclude into the set of checks to run.
fn resolve_checks(options: &LintOptions) -> AnalysisResult<HashSet<&'static str>> {
    let lookup = |name: &str| {
        ALL_CHECKS
            .iter()
            .copied()
            .find(|check| *check == name)
            .ok_or_else(|| AnalysisError::UnknownCheck {
                name: name.to_string(),
                available: ALL_CHECKS.join(", "),
            })
    };

    match (&options.checks, &options.exclude) {
        (Some(checks), None) => checks.iter().map(|name| lookup(name.as_str())).collect(),
        (None, Some(exclude)) => {
            let excluded = exclude
                .iter()
                .map(|name| lookup(name.as_str()))
                .collect::<AnalysisResult<HashSet<_>>>()?;
            Ok(ALL_CHECKS
                .iter()
                .copied()
                .filter(|check| !excluded.contains(check))
                .collect())
        }
        (Some(_), Some(_)) => Err(AnalysisError::ConflictingConfig(
            "cannot specify both 'checks' and 'exclude'".to_string(),
        )),
        (None, None) => Ok(ALL_CHECKS.iter().copied().collect()),
    }
}

fn resolve_allow(allow: &[String]) -> AnalysisResult<HashSet<&'static str>> {
    let known = allowable_flags();
    allow
        .iter()
        .map(|name| {
            known
                .iter()
                .copied()
                .find(|flag| *flag == name.as_str())
                .ok_or_else(|| AnalysisError::UnknownFlag {
                    name: name.clone(),
                    available: known.join(", "),
                })
        })
        .collect()
}
