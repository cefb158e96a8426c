//! Command implementations.

use anyhow::Context;
use camino::Utf8Path;

pub mod check;
pub mod convert;
pub mod formatting;
pub mod info;
pub mod issues;
pub mod language;
pub mod ranges;

/// Read a file and validate its size against the configured limit.
///
/// The file must be valid UTF-8; decoding failures are reported with the path.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = input_size(metadata.len());
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}

/// File length as `usize`, saturating where `usize` is narrower than `u64`.
fn input_size(len: u64) -> usize {
    usize::try_from(len).unwrap_or(usize::MAX)
}

/// Render characters so invisible ones still show up: `'x' U+0078`.
pub fn describe_chars(chars: &[char]) -> String {
    chars
        .iter()
        .map(|&c| {
            let cp = kana_lint_core::ranges::format_codepoint(u32::from(c));
            if c.is_control() || c.is_whitespace() {
                cp
            } else {
                format!("'{c}' {cp}")
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    #[test]
    fn reads_utf8_file() {
        let tmp = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("lyrics.txt")).unwrap();
        std::fs::write(&path, "さくら").unwrap();
        assert_eq!(read_input_file(&path, None).unwrap(), "さくら");
    }

    #[test]
    fn rejects_oversized_file() {
        let tmp = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("big.txt")).unwrap();
        std::fs::write(&path, "あいうえお").unwrap();
        let err = read_input_file(&path, Some(4)).unwrap_err();
        assert!(err.to_string().contains("input too large"));
    }

    #[test]
    fn huge_lengths_saturate_instead_of_wrapping() {
        assert_eq!(input_size(u64::MAX), usize::MAX);
        assert_eq!(input_size(4096), 4096);
        assert!(input_size(u64::MAX) > kana_lint_core::DEFAULT_MAX_INPUT_BYTES);
    }

    #[test]
    fn rejects_invalid_utf8() {
        let tmp = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("sjis.txt")).unwrap();
        std::fs::write(&path, [0x82, 0xA0]).unwrap();
        assert!(read_input_file(&path, None).is_err());
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = read_input_file(Utf8Path::new("no/such/file.txt"), None).unwrap_err();
        assert!(err.to_string().contains("no/such/file.txt"));
    }

    #[test]
    fn invisible_chars_are_shown_by_codepoint() {
        assert_eq!(describe_chars(&['\t', '😀']), "U+0009, '😀' U+1F600");
        assert_eq!(describe_chars(&[]), "");
    }
}
