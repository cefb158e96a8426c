//! Whitespace and newline layout checks.
//!
//! These mostly catch copy-paste damage. Carriage returns are not handled:
//! input is expected to use bare `\n` line endings.

use serde::{Deserialize, Serialize};

/// Flag label for a leading or trailing line feed.
pub const LEADING_OR_TRAILING_NEWLINE: &str = "leading_or_trailing_newline";
/// Flag label for three consecutive line feeds.
pub const TRIPLE_NEWLINE: &str = "triple_newline";
/// Flag label for an ASCII or ideographic space.
pub const CONTAINS_SPACE: &str = "contains_space";

/// Every format flag label, in reporting order.
pub const ALL_FORMAT_FLAGS: &[&str] = &[LEADING_OR_TRAILING_NEWLINE, TRIPLE_NEWLINE, CONTAINS_SPACE];

/// Result of the formatting audit. Each flag is independent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattingReport {
    /// Text starts or ends with `\n`.
    pub leading_or_trailing_newline: bool,
    /// Text contains `\n\n\n`.
    pub triple_newline: bool,
    /// Text contains U+0020 or U+3000.
    pub contains_space: bool,
}

impl FormattingReport {
    /// Labels of the raised flags, in [`ALL_FORMAT_FLAGS`] order.
    pub fn flags(&self) -> Vec<&'static str> {
        [
            (self.leading_or_trailing_newline, LEADING_OR_TRAILING_NEWLINE),
            (self.triple_newline, TRIPLE_NEWLINE),
            (self.contains_space, CONTAINS_SPACE),
        ]
        .into_iter()
        .filter_map(|(raised, label)| raised.then_some(label))
        .collect()
    }

    /// Whether no flag was raised.
    pub const fn is_clean(&self) -> bool {
        !(self.leading_or_trailing_newline || self.triple_newline || self.contains_space)
    }
}

/// Check `text` for newline and space irregularities.
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn detect_formatting(text: &str) -> FormattingReport {
    FormattingReport {
        leading_or_trailing_newline: text.starts_with('\n') || text.ends_with('\n'),
        triple_newline: text.contains("\n\n\n"),
        contains_space: text.contains([' ', '\u{3000}']),
    }
}
