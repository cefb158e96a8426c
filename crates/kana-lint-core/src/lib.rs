//! Core library for kana-lint.
//!
//! This crate classifies the characters of a Japanese text and converts
//! between full-width and half-width forms. Every detector is a pure function
//! over a `&str`: nothing is mutated, nothing is cached, and "nothing found" is
//! an ordinary empty result.
//!
//! # Modules
//!
//! - [`ranges`] - The static codepoint range registry
//! - [`script`] - Script detection and unknown characters
//! - [`style`] - Rare, obsolete and legacy-encoded characters
//! - [`format`] - Newline and space layout
//! - [`width`] - Full-width / half-width conversion
//! - [`lint`] - Runs the detectors together for a pass/fail verdict
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use kana_lint_core::{detect_issues, detect_language, to_half_width};
//!
//! let report = detect_language("こんにちは、世界！");
//! assert_eq!(report.text_langs, vec!["jp"]);
//! assert!(detect_issues("こんにちは、世界！").is_empty());
//! assert_eq!(to_half_width("ａ\u{3000}ｂ"), "a b");
//! ```
#![deny(unsafe_code)]

pub mod config;

pub mod error;

pub mod format;
pub mod lint;
pub mod ranges;
pub mod script;
pub mod style;
pub mod width;

pub use config::{Config, ConfigLoader, LogLevel};

pub use error::{AnalysisError, AnalysisResult, ConfigError, ConfigResult};

pub use format::{FormattingReport, detect_formatting};
pub use lint::{LintOptions, LintReport, run_lint};
pub use script::{LanguageReport, detect_language};
pub use style::{IssuesReport, StyleIssue, detect_issues};
pub use width::{Width, to_full_width, to_half_width};

/// Default maximum input size, in bytes (5 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
