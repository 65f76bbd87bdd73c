//! Fuzzy filename search.
//!
//! A file matches when the lowercased query is an ordered subsequence of its
//! lowercased final path component. Names starting with the query rank
//! first, then shorter names.

use crate::index::store::IndexStore;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

/// Whether every char of `needle` appears in `haystack` in order
pub fn is_subsequence(needle: &str, haystack: &str) -> bool {
    let mut remaining = haystack.chars();
    needle
        .chars()
        .all(|wanted| remaining.by_ref().any(|c| c == wanted))
}

struct NameMatch<'a> {
    path: &'a Path,
    is_prefix: bool,
    name_len: usize,
}

impl NameMatch<'_> {
    fn rank(&self, other: &Self) -> Ordering {
        other
            .is_prefix
            .cmp(&self.is_prefix)
            .then(self.name_len.cmp(&other.name_len))
            .then_with(|| self.path.cmp(other.path))
    }
}

/// Paths whose file name fuzzily matches `query`, best first
pub fn search_file_name(store: &IndexStore, query: &str, max_results: usize) -> Vec<PathBuf> {
    let query = query.to_lowercase();
    if query.is_empty() || max_results == 0 {
        return Vec::new();
    }

    let mut matches: Vec<NameMatch<'_>> = store
        .documents()
        .iter()
        .filter_map(|file| {
            let name = file.path.file_name()?.to_string_lossy().to_lowercase();
            if !is_subsequence(&query, &name) {
                return None;
            }
            Some(NameMatch {
                path: &file.path,
                is_prefix: name.starts_with(&query),
                name_len: name.chars().count(),
            })
        })
        .collect();

    matches.sort_by(|a, b| a.rank(b));
    matches
        .into_iter()
        .take(max_results)
        .map(|m| m.path.to_path_buf())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::build::index_content;
    use crate::index::types::IndexConfig;

    fn store_with(paths: &[&str]) -> IndexStore {
        let config = IndexConfig::default();
        let mut store = IndexStore::new();
        for path in paths {
            store.insert(index_content(PathBuf::from(path), "", 0, &config));
        }
        store
    }

    #[test]
    fn test_is_subsequence() {
        assert!(is_subsequence("abc", "axbxc.py"));
        assert!(!is_subsequence("abc", "acb.py"));
        assert!(is_subsequence("", "anything"));
        assert!(!is_subsequence("aa", "a"));
    }

    #[test]
    fn test_subsequence_match() {
        let store = store_with(&["src/aXbXc.py", "src/acb.py"]);
        let results = search_file_name(&store, "abc", 10);
        assert_eq!(results, vec![PathBuf::from("src/aXbXc.py")]);
    }

    #[test]
    fn test_prefix_then_length_ordering() {
        let store = store_with(&[
            "lib/my_main.rs",
            "src/main_window.rs",
            "src/main.rs",
            "x/m_a_i_n.rs",
        ]);
        let results = search_file_name(&store, "MAIN", 10);
        assert_eq!(
            results,
            vec![
                PathBuf::from("src/main.rs"),
                PathBuf::from("src/main_window.rs"),
                PathBuf::from("lib/my_main.rs"),
                PathBuf::from("x/m_a_i_n.rs"),
            ]
        );
    }

    #[test]
    fn test_matches_file_name_only() {
        let store = store_with(&["search/util.py"]);
        assert!(search_file_name(&store, "search", 10).is_empty());
        assert_eq!(search_file_name(&store, "util", 10).len(), 1);
    }

    #[test]
    fn test_limits_and_empty_query() {
        let store = store_with(&["a1.rs", "a2.rs", "a3.rs"]);
        assert_eq!(search_file_name(&store, "a", 2).len(), 2);
        assert!(search_file_name(&store, "a", 0).is_empty());
        assert!(search_file_name(&store, "", 10).is_empty());
    }
}
