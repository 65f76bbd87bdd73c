use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Maximum token length to store in the index.
/// Longer identifier runs are split into several tokens by the matcher.
pub const MAX_WORD_LENGTH: usize = 50;

/// Identifier-like word: a letter or underscore followed by 1-49 word characters.
/// Applied to lowercased text, so only the lowercase classes are needed.
static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-z_][a-z0-9_]{1,49}").expect("word pattern is a valid regex")
});

/// Extract the distinct words of already-lowercased content.
///
/// Matches are leftmost-greedy and non-overlapping, so a run longer than
/// [`MAX_WORD_LENGTH`] yields a 50-character word followed by whatever
/// the remainder of the run matches.
pub fn extract_words(content: &str) -> BTreeSet<String> {
    WORD_PATTERN
        .find_iter(content)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_words() {
        let words = extract_words("def search(query): return query");
        let expected: BTreeSet<String> = ["def", "search", "query", "return"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(words, expected);
    }

    #[test]
    fn test_single_characters_are_dropped() {
        let words = extract_words("a = b + c1");
        assert_eq!(words.into_iter().collect::<Vec<_>>(), vec!["c1"]);
    }

    #[test]
    fn test_underscore_and_digits() {
        let words = extract_words("__init__ _x v2 9lives");
        assert!(words.contains("__init__"));
        assert!(words.contains("_x"));
        assert!(words.contains("v2"));
        // digit cannot start a word, the match begins after it
        assert!(words.contains("lives"));
        assert!(!words.contains("9lives"));
    }

    #[test]
    fn test_long_runs_are_split() {
        let run = "a".repeat(51);
        let words = extract_words(&run);
        assert_eq!(words.len(), 1);
        assert_eq!(words.iter().next().map(String::len), Some(MAX_WORD_LENGTH));

        let run = format!("{}bc", "a".repeat(50));
        let words = extract_words(&run);
        assert!(words.contains("bc"));
        assert_eq!(words.len(), 2);
    }

    #[test]
    fn test_non_ascii_breaks_words() {
        let words = extract_words("caf\u{e9}ine na\u{ef}ve");
        assert!(words.contains("caf"));
        assert!(words.contains("ine"));
        assert!(words.contains("na"));
        assert!(words.contains("ve"));
    }
}
