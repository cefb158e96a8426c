//! Style auditing for rare, obsolete or legacy-encoded characters.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ranges::{CodepointRange, WARNING};

/// A warning category that matched, with the characters that triggered it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleIssue {
    /// Warning category label (e.g. `"half_katakana"`).
    pub flag: String,
    /// Distinct offending characters, sorted by codepoint.
    pub chars: Vec<char>,
}

/// Result of a style audit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuesReport {
    /// Matched categories, in registry order.
    pub issues: Vec<StyleIssue>,
}

impl IssuesReport {
    /// The labels of every matched category.
    pub fn flags(&self) -> Vec<&str> {
        self.issues.iter().map(|issue| issue.flag.as_str()).collect()
    }

    /// Whether `flag` was raised.
    pub fn has(&self, flag: &str) -> bool {
        self.issues.iter().any(|issue| issue.flag == flag)
    }

    /// Whether no category matched.
    pub const fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Audit `text` against the [`WARNING`] table.
pub fn detect_issues(text: &str) -> IssuesReport {
    detect_issues_in(text, &[WARNING])
}

/// Audit `text` against each of `tables`, in order.
#[tracing::instrument(skip_all, fields(text_len = text.len(), tables = tables.len()))]
pub fn detect_issues_in(text: &str, tables: &[&[CodepointRange]]) -> IssuesReport {
    let issues: Vec<StyleIssue> = tables
        .iter()
        .flat_map(|table| table.iter())
        .filter_map(|range| {
            let chars: BTreeSet<char> = text.chars().filter(|&c| range.contains(c)).collect();
            (!chars.is_empty()).then(|| StyleIssue {
                flag: range.label().to_string(),
                chars: chars.into_iter().collect(),
            })
        })
        .collect();

    tracing::debug!(issues = issues.len(), "style audit complete");
    IssuesReport { issues }
}
