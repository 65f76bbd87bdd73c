//! Content search: additive scoring over the word and trigram indexes.
//!
//! Per file, each query word earns [`EXACT_WORD_SCORE`] when the file holds
//! that exact word and [`PREFIX_WORD_SCORE`] for every word in the file that
//! starts with it (the exact word itself included). Each query trigram the
//! file contains adds [`TRIGRAM_SCORE`].

use crate::index::store::IndexStore;
use crate::index::types::{ContentMatch, DocId, Trigram};
use crate::utils::{extract_trigrams, extract_words};
use ahash::AHashMap;
use std::collections::BTreeSet;

pub const EXACT_WORD_SCORE: u32 = 10;
pub const PREFIX_WORD_SCORE: u32 = 5;
pub const TRIGRAM_SCORE: u32 = 1;

/// Words and trigrams of a query, extracted with the indexing rules
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryTerms {
    pub words: BTreeSet<String>,
    pub trigrams: BTreeSet<Trigram>,
}

impl QueryTerms {
    pub fn parse(query: &str, max_trigrams: usize) -> Self {
        let lowered = query.to_lowercase();
        Self {
            words: extract_words(&lowered),
            trigrams: extract_trigrams(lowered.as_bytes(), max_trigrams),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty() && self.trigrams.is_empty()
    }
}

/// Score every file touched by the query terms
pub fn score_files(store: &IndexStore, terms: &QueryTerms) -> AHashMap<DocId, u32> {
    let mut scores: AHashMap<DocId, u32> = AHashMap::new();
    let mut add = |ids: &[DocId], points: u32| {
        for &id in ids {
            *scores.entry(id).or_insert(0) += points;
        }
    };

    for word in &terms.words {
        if let Some(ids) = store.word_postings(word) {
            add(ids, EXACT_WORD_SCORE);
        }
        for (_, ids) in store.words_with_prefix(word) {
            add(ids, PREFIX_WORD_SCORE);
        }
    }

    for &trigram in &terms.trigrams {
        if let Some(ids) = store.trigram_postings(trigram) {
            add(ids, TRIGRAM_SCORE);
        }
    }

    scores
}

/// Rank files for a parsed query, best first, ties broken by path
pub fn search_content(store: &IndexStore, terms: &QueryTerms, max_results: usize) -> Vec<ContentMatch> {
    if terms.is_empty() || max_results == 0 {
        return Vec::new();
    }

    let mut matches: Vec<ContentMatch> = score_files(store, terms)
        .into_iter()
        .filter_map(|(id, score)| {
            store.document(id).map(|file| ContentMatch {
                path: file.path.clone(),
                score,
            })
        })
        .collect();

    matches.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.path.cmp(&b.path)));
    matches.truncate(max_results);
    matches
}
