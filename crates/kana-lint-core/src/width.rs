//! Full-width / half-width conversion.
//!
//! Only characters with a direct ASCII counterpart are mapped: U+FF01..=U+FF5E
//! sit exactly [`WIDTH_OFFSET`] above `!`..=`~`, and the ideographic space
//! pairs with the ASCII space. Everything else passes through, so full-width
//! bracket quotes such as `「」` stay as they are in both directions.

use serde::{Deserialize, Serialize};

/// Distance between a full-width form and its ASCII equivalent.
pub const WIDTH_OFFSET: u32 = 0xFEE0;

const IDEOGRAPHIC_SPACE: char = '\u{3000}';

/// Conversion direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Width {
    /// Full-width forms to ASCII.
    Half,
    /// ASCII to full-width forms.
    Full,
}

impl Width {
    /// Returns the direction as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Half => "half",
            Self::Full => "full",
        }
    }

    /// Convert `text` in this direction.
    pub fn convert(self, text: &str) -> String {
        match self {
            Self::Half => to_half_width(text),
            Self::Full => to_full_width(text),
        }
    }
}

impl std::fmt::Display for Width {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a single character to its half-width form, if it has one.
pub fn half_width_char(c: char) -> char {
    match c {
        '\u{FF01}'..='\u{FF5E}' => char::from_u32(u32::from(c) - WIDTH_OFFSET).unwrap_or(c),
        IDEOGRAPHIC_SPACE => ' ',
        _ => c,
    }
}

/// Map a single character to its full-width form, if it has one.
pub fn full_width_char(c: char) -> char {
    match c {
        '!'..='~' => char::from_u32(u32::from(c) + WIDTH_OFFSET).unwrap_or(c),
        ' ' => IDEOGRAPHIC_SPACE,
        _ => c,
    }
}

/// Replace full-width ASCII forms and the ideographic space with ASCII.
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn to_half_width(text: &str) -> String {
    text.chars().map(half_width_char).collect()
}

/// Replace printable ASCII and the ASCII space with full-width forms.
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn to_full_width(text: &str) -> String {
    text.chars().map(full_width_char).collect()
}
