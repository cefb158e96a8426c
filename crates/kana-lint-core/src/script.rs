//! Script detection.
//!
//! Reports which scripts a text uses for punctuation and for its letters, and
//! which characters fall outside every acceptable range.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ranges::{self, CodepointRange, PUNCTUATION, TEXT};

/// Result of script detection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageReport {
    /// Punctuation scripts present, in registry order.
    pub punctuation_langs: Vec<String>,
    /// Text scripts present, in registry order.
    pub text_langs: Vec<String>,
    /// Distinct characters outside the recognized universe, sorted by codepoint.
    pub unknown_chars: Vec<char>,
}

impl LanguageReport {
    /// Whether every character of the text was recognized.
    pub const fn all_known(&self) -> bool {
        self.unknown_chars.is_empty()
    }
}

/// Detect the scripts used in `text` and collect unrecognized characters.
///
/// A character that only shows up in the warning table is still known as long
/// as an acceptable table also lists it. Empty text yields an empty report.
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn detect_language(text: &str) -> LanguageReport {
    let unknown: BTreeSet<char> = text.chars().filter(|&c| !ranges::is_known(c)).collect();

    let report = LanguageReport {
        punctuation_langs: matching_labels(PUNCTUATION, text),
        text_langs: matching_labels(TEXT, text),
        unknown_chars: unknown.into_iter().collect(),
    };
    tracing::debug!(
        punctuation = ?report.punctuation_langs,
        text = ?report.text_langs,
        unknown = report.unknown_chars.len(),
        "language detected"
    );
    report
}

fn matching_labels(table: &[CodepointRange], text: &str) -> Vec<String> {
    table
        .iter()
        .filter(|range| range.matches(text))
        .map(|range| range.label().to_string())
        .collect()
}
