use crate::index::types::{Trigram, bytes_to_trigram};
use ahash::AHashSet;
use std::collections::BTreeSet;

/// Extract the distinct alphanumeric trigrams of already-lowercased content.
///
/// A 3-byte window is kept only when all three bytes are ASCII letters or
/// digits, so shingles touching whitespace, punctuation or multi-byte UTF-8
/// never enter the index. Collection stops once `max_trigrams` distinct
/// trigrams have been seen.
pub fn extract_trigrams(content: &[u8], max_trigrams: usize) -> BTreeSet<Trigram> {
    if content.len() < 3 || max_trigrams == 0 {
        return BTreeSet::new();
    }

    let mut seen = AHashSet::with_capacity(max_trigrams.min(content.len()));
    for window in content.windows(3) {
        if !window.iter().all(u8::is_ascii_alphanumeric) {
            continue;
        }
        seen.insert(bytes_to_trigram(window[0], window[1], window[2]));
        if seen.len() >= max_trigrams {
            break;
        }
    }

    seen.into_iter().collect()
}

/// Count line terminators: `\n`, or a bare `\r` not followed by `\n`.
/// A file's line count is this plus one.
#[inline]
pub fn count_newlines(content: &[u8]) -> usize {
    memchr::memchr2_iter(b'\n', b'\r', content)
        .filter(|&pos| content[pos] == b'\n' || content.get(pos + 1) != Some(&b'\n'))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::types::trigram_to_bytes;

    fn as_strings(trigrams: &BTreeSet<Trigram>) -> Vec<String> {
        trigrams
            .iter()
            .map(|t| String::from_utf8_lossy(&trigram_to_bytes(*t)).into_owned())
            .collect()
    }

    #[test]
    fn test_extract_trigrams() {
        let trigrams = extract_trigrams(b"hello", 5_000);
        assert_eq!(as_strings(&trigrams), vec!["ell", "hel", "llo"]);
    }

    #[test]
    fn test_extract_trigrams_small() {
        assert!(extract_trigrams(b"", 5_000).is_empty());
        assert!(extract_trigrams(b"a", 5_000).is_empty());
        assert!(extract_trigrams(b"ab", 5_000).is_empty());
        assert_eq!(extract_trigrams(b"abc", 5_000).len(), 1);
    }

    #[test]
    fn test_skips_non_alphanumeric_windows() {
        // "o w" and "_ba" straddle separators
        let trigrams = extract_trigrams(b"foo bar_baz", 5_000);
        assert_eq!(as_strings(&trigrams), vec!["bar", "baz", "foo"]);
    }

    #[test]
    fn test_skips_multibyte_utf8() {
        let trigrams = extract_trigrams("caf\u{e9}s".as_bytes(), 5_000);
        assert_eq!(as_strings(&trigrams), vec!["caf"]);
    }

    #[test]
    fn test_digits_are_alphanumeric() {
        let trigrams = extract_trigrams(b"x86", 5_000);
        assert_eq!(as_strings(&trigrams), vec!["x86"]);
    }

    #[test]
    fn test_trigram_cap() {
        let content: String = (0..2_000).map(|i| format!("w{i:05} ")).collect();
        let trigrams = extract_trigrams(content.as_bytes(), 100);
        assert_eq!(trigrams.len(), 100);
        assert!(extract_trigrams(content.as_bytes(), 0).is_empty());
    }

    #[test]
    fn test_count_newlines() {
        assert_eq!(count_newlines(b""), 0);
        assert_eq!(count_newlines(b"one"), 0);
        assert_eq!(count_newlines(b"one\ntwo\n"), 2);
        assert_eq!(count_newlines(b"\r\n\r\n"), 2);
    }

    #[test]
    fn test_bare_carriage_returns() {
        assert_eq!(count_newlines(b"a\rb\rc"), 2);
        assert_eq!(count_newlines(b"a\r\nb\rc\n"), 3);
        assert_eq!(count_newlines(b"\r"), 1);
        assert_eq!(count_newlines(b"\r\r\n"), 2);
    }
}
