//! Codepoint range registry.
//!
//! Every classification in this crate is answered from the static tables in
//! this module. A [`CodepointRange`] is a labelled list of inclusive
//! `[low, high]` intervals, sorted by `low` and non-overlapping, so membership
//! is a binary search.
//!
//! The tables overlap on purpose. Half-width katakana is acceptable text (it
//! is not *unknown*), but it is also listed in [`WARNING`] because it usually
//! means the text was pasted from a legacy encoding.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A named set of inclusive codepoint intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodepointRange {
    label: &'static str,
    intervals: &'static [(u32, u32)],
}

impl CodepointRange {
    /// Create a range from sorted, non-overlapping inclusive intervals.
    pub const fn new(label: &'static str, intervals: &'static [(u32, u32)]) -> Self {
        Self { label, intervals }
    }

    /// The category label reported to callers (e.g. `"jp"`, `"half_katakana"`).
    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// The inclusive intervals making up this range.
    pub const fn intervals(&self) -> &'static [(u32, u32)] {
        self.intervals
    }

    /// Whether `c` lies in any interval of this range.
    pub fn contains(&self, c: char) -> bool {
        let cp = u32::from(c);
        self.intervals
            .binary_search_by(|&(low, high)| {
                if high < cp {
                    Ordering::Less
                } else if low > cp {
                    Ordering::Greater
                } else {
                    Ordering::Equal
                }
            })
            .is_ok()
    }

    /// Whether any character of `text` lies in this range.
    pub fn matches(&self, text: &str) -> bool {
        text.chars().any(|c| self.contains(c))
    }
}

/// Acceptable punctuation, per script.
pub static PUNCTUATION: &[CodepointRange] = &[
    CodepointRange::new(
        "en",
        &[(0x0020, 0x002F), (0x003A, 0x003F), (0x005B, 0x0060), (0x007B, 0x007E)],
    ),
    CodepointRange::new(
        "jp",
        &[
            (0x3000, 0x301F), // CJK symbols and punctuation
            (0x30FB, 0x30FC), // katakana middle dot, long vowel mark
            (0xFF01, 0xFF0F),
            (0xFF1A, 0xFF20),
            (0xFF3B, 0xFF40),
            (0xFF5B, 0xFF65), // full-width brackets through half-width punctuation
            (0xFF70, 0xFF70),
            (0xFF9E, 0xFF9F), // half-width (semi-)voiced sound marks
        ],
    ),
];

/// Acceptable letters, digits and ideographs, per script.
///
/// Rare "w-row" kana are excluded from both syllabaries. The "v-row" and small
/// kana still see use in katakana, so they are only excluded from hiragana.
pub static TEXT: &[CodepointRange] = &[
    CodepointRange::new("en", &[(0x0030, 0x0039), (0x0041, 0x005A), (0x0061, 0x007A)]),
    CodepointRange::new(
        "jp",
        &[
            (0x3041, 0x3096), // hiragana
            (0x30A1, 0x30EF), // katakana
            (0x30F2, 0x30F9),
            (0x3400, 0x4DB5), // CJK extension A
            (0x4E00, 0x9FCB), // CJK unified ideographs
            (0xF900, 0xFA6A), // CJK compatibility ideographs
            (0xFF10, 0xFF19), // full-width digits
            (0xFF21, 0xFF3A), // full-width upper case
            (0xFF41, 0xFF5A), // full-width lower case
            (0xFF66, 0xFF6F), // half-width katakana
            (0xFF71, 0xFF9D),
        ],
    ),
];

/// Characters that are valid but worth a second look before publishing.
///
/// Registry order is the order flags are reported in.
pub static WARNING: &[CodepointRange] = &[
    CodepointRange::new(
        "unusual_hiragana",
        &[(0x3090, 0x3091), (0x3094, 0x3096), (0x3099, 0x309F)],
    ),
    CodepointRange::new("unusual_katakana", &[(0x30F0, 0x30F1), (0x30FF, 0x30FF)]),
    CodepointRange::new("half_katakana", &[(0xFF66, 0xFF6F), (0xFF71, 0xFF9D)]),
    CodepointRange::new(
        "unusual_jp_punc",
        &[(0x30A0, 0x30A0), (0xFF61, 0xFF65), (0xFF70, 0xFF70), (0xFF9E, 0xFF9F)],
    ),
    // CJK radicals supplement; U+2E9A is unassigned
    CodepointRange::new("cjk_radicals", &[(0x2E80, 0x2E99), (0x2E9B, 0x2EF3)]),
    CodepointRange::new("kangxi_radicals", &[(0x2F00, 0x2FD5)]),
    // Only the ideographic iteration mark (U+3005) is common, and formal
    // writing spells kana repetition out.
    CodepointRange::new(
        "iteration_marks",
        &[(0x3005, 0x3005), (0x309D, 0x309E), (0x30FD, 0x30FE)],
    ),
    // Small katakana used only for Ainu
    CodepointRange::new("katakana_extensions", &[(0x31F0, 0x31FF)]),
    CodepointRange::new("jp_symbols", &[(0x3220, 0x3243), (0x3280, 0x337F)]),
];

/// Warnings that are off unless a caller opts in.
pub static OPTIONAL_WARNING: &[CodepointRange] = &[CodepointRange::new(
    "full_width_alphanumeric",
    &[(0xFF10, 0xFF19), (0xFF21, 0xFF3A), (0xFF41, 0xFF5A)],
)];

/// The registry tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum TableKind {
    /// Acceptable punctuation.
    Punctuation,
    /// Acceptable letters, digits and ideographs.
    Text,
    /// Stylistic warnings.
    Warning,
    /// Opt-in stylistic warnings.
    OptionalWarning,
}

impl TableKind {
    /// Every table, in listing order.
    pub const ALL: [Self; 4] = [
        Self::Punctuation,
        Self::Text,
        Self::Warning,
        Self::OptionalWarning,
    ];

    /// Returns the table name as a kebab-case string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Punctuation => "punctuation",
            Self::Text => "text",
            Self::Warning => "warning",
            Self::OptionalWarning => "optional-warning",
        }
    }

    /// The ranges registered under this table.
    pub const fn ranges(&self) -> &'static [CodepointRange] {
        match self {
            Self::Punctuation => PUNCTUATION,
            Self::Text => TEXT,
            Self::Warning => WARNING,
            Self::OptionalWarning => OPTIONAL_WARNING,
        }
    }

    /// Look up a range in this table by label.
    pub fn find(&self, label: &str) -> Option<&'static CodepointRange> {
        self.ranges().iter().find(|range| range.label() == label)
    }
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `c` is part of the recognized universe.
///
/// That is a line feed, or any range of [`PUNCTUATION`] or [`TEXT`]. Tabs,
/// carriage returns and other control characters are not recognized.
pub fn is_known(c: char) -> bool {
    c == '\n' || PUNCTUATION.iter().chain(TEXT).any(|range| range.contains(c))
}

/// Render a codepoint as `U+XXXX`.
pub fn format_codepoint(cp: u32) -> String {
    format!("U+{cp:04X}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intervals_are_sorted_and_disjoint() {
        for kind in TableKind::ALL {
            for range in kind.ranges() {
                for &(low, high) in range.intervals() {
                    assert!(low <= high, "{kind}/{}: {low:X} > {high:X}", range.label());
                }
                for pair in range.intervals().windows(2) {
                    assert!(
                        pair[0].1 < pair[1].0,
                        "{kind}/{}: intervals out of order at {:X}",
                        range.label(),
                        pair[1].0
                    );
                }
            }
        }
    }

    #[test]
    fn labels_are_unique_within_a_table() {
        for kind in TableKind::ALL {
            let mut labels: Vec<_> = kind.ranges().iter().map(CodepointRange::label).collect();
            let total = labels.len();
            labels.sort_unstable();
            labels.dedup();
            assert_eq!(labels.len(), total, "duplicate label in {kind}");
        }
    }

    #[test]
    fn contains_checks_interval_edges() {
        let jp = TableKind::Text.find("jp").unwrap();
        assert!(jp.contains('\u{3041}'));
        assert!(jp.contains('\u{3096}'));
        assert!(!jp.contains('\u{3040}'));
        assert!(!jp.contains('\u{3097}'));
        assert!(jp.contains('漢'));
        assert!(!jp.contains('a'));
    }

    #[test]
    fn single_codepoint_interval() {
        let punc = TableKind::Warning.find("unusual_jp_punc").unwrap();
        assert!(punc.contains('\u{30A0}'));
        assert!(!punc.contains('\u{30A1}'));
    }

    #[test]
    fn ascii_tables_cover_printable_ascii_except_at_sign() {
        let punc = TableKind::Punctuation.find("en").unwrap();
        let text = TableKind::Text.find("en").unwrap();
        let uncovered: Vec<char> = (' '..='~')
            .filter(|&c| {
                assert!(!(punc.contains(c) && text.contains(c)), "{c:?} in both");
                !punc.contains(c) && !text.contains(c)
            })
            .collect();
        assert_eq!(uncovered, vec!['@']);
    }

    #[test]
    fn half_katakana_is_known_and_warned() {
        let c = 'ｱ';
        assert!(is_known(c));
        assert!(TableKind::Warning.find("half_katakana").unwrap().contains(c));
    }

    #[test]
    fn newline_is_known_but_other_controls_are_not() {
        assert!(is_known('\n'));
        assert!(!is_known('\r'));
        assert!(!is_known('\t'));
        assert!(!is_known('\u{0000}'));
    }

    #[test]
    fn find_unknown_label_is_none() {
        assert!(TableKind::Warning.find("en").is_none());
        assert!(TableKind::Punctuation.find("en").is_some());
    }

    #[test]
    fn matches_scans_whole_text() {
        let kangxi = TableKind::Warning.find("kangxi_radicals").unwrap();
        assert!(kangxi.matches("abc\u{2F00}"));
        assert!(!kangxi.matches("一"));
        assert!(!kangxi.matches(""));
    }

    #[test]
    fn codepoint_formatting() {
        assert_eq!(format_codepoint(0x3000), "U+3000");
        assert_eq!(format_codepoint(0x1F600), "U+1F600");
        assert_eq!(format_codepoint(0x41), "U+0041");
    }
}
