use crate::index::types::{DocId, IndexStats, IndexedFile, Trigram};
use ahash::AHashMap;
use std::collections::BTreeMap;
use std::ops::Bound;
use std::path::{Path, PathBuf};

/// In-memory inverted indexes over one build's files.
///
/// Files live in a document table addressed by [`DocId`]; the word and
/// trigram maps hold sorted, duplicate-free posting lists of those ids.
/// Words are kept in an ordered map so prefix lookups are a range scan.
#[derive(Debug, Default)]
pub struct IndexStore {
    documents: Vec<IndexedFile>,
    path_to_id: AHashMap<PathBuf, DocId>,
    word_postings: BTreeMap<String, Vec<DocId>>,
    trigram_postings: AHashMap<Trigram, Vec<DocId>>,
}

impl IndexStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every file and posting
    pub fn clear(&mut self) {
        self.documents.clear();
        self.path_to_id.clear();
        self.word_postings.clear();
        self.trigram_postings.clear();
    }

    /// Fold worker batches into the store in a single pass
    pub fn merge(&mut self, batches: Vec<Vec<IndexedFile>>) {
        for file in batches.into_iter().flatten() {
            self.insert(file);
        }
    }

    /// Insert or overwrite one file and register its words and trigrams
    pub fn insert(&mut self, file: IndexedFile) -> DocId {
        let doc_id = match self.path_to_id.get(&file.path) {
            Some(&id) => {
                self.unlink(id);
                id
            }
            None => {
                let id = self.documents.len() as DocId;
                self.path_to_id.insert(file.path.clone(), id);
                id
            }
        };

        for word in &file.words {
            add_posting(self.word_postings.entry(word.clone()).or_default(), doc_id);
        }
        for &trigram in &file.trigrams {
            add_posting(self.trigram_postings.entry(trigram).or_default(), doc_id);
        }

        if (doc_id as usize) < self.documents.len() {
            self.documents[doc_id as usize] = file;
        } else {
            self.documents.push(file);
        }
        doc_id
    }

    /// Drop `doc_id` from the postings of the file it currently holds
    fn unlink(&mut self, doc_id: DocId) {
        let Some(previous) = self.documents.get(doc_id as usize) else {
            return;
        };
        for word in &previous.words {
            if let Some(postings) = self.word_postings.get_mut(word) {
                remove_posting(postings, doc_id);
                if postings.is_empty() {
                    self.word_postings.remove(word);
                }
            }
        }
        for trigram in &previous.trigrams {
            if let Some(postings) = self.trigram_postings.get_mut(trigram) {
                remove_posting(postings, doc_id);
                if postings.is_empty() {
                    self.trigram_postings.remove(trigram);
                }
            }
        }
    }

    pub fn get(&self, path: &Path) -> Option<&IndexedFile> {
        self.path_to_id
            .get(path)
            .map(|&id| &self.documents[id as usize])
    }

    pub fn document(&self, doc_id: DocId) -> Option<&IndexedFile> {
        self.documents.get(doc_id as usize)
    }

    /// All indexed files in id order
    pub fn documents(&self) -> &[IndexedFile] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Files containing exactly this word
    pub fn word_postings(&self, word: &str) -> Option<&[DocId]> {
        self.word_postings.get(word).map(Vec::as_slice)
    }

    /// Every indexed word starting with `prefix` (including `prefix` itself)
    pub fn words_with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a [DocId])> + 'a {
        self.word_postings
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(move |(word, _)| word.starts_with(prefix))
            .map(|(word, ids)| (word.as_str(), ids.as_slice()))
    }

    /// Files containing this trigram
    pub fn trigram_postings(&self, trigram: Trigram) -> Option<&[DocId]> {
        self.trigram_postings.get(&trigram).map(Vec::as_slice)
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            files: self.documents.len(),
            words: self.word_postings.len(),
            trigrams: self.trigram_postings.len(),
            total_bytes: self.documents.iter().map(|f| f.size).sum(),
            total_lines: self.documents.iter().map(|f| f.line_count).sum(),
        }
    }
}

/// Keep a posting list sorted and free of duplicates.
/// Ids arrive in increasing order during a build, so this is usually a push.
#[inline]
fn add_posting(postings: &mut Vec<DocId>, doc_id: DocId) {
    if let Err(pos) = postings.binary_search(&doc_id) {
        postings.insert(pos, doc_id);
    }
}

#[inline]
fn remove_posting(postings: &mut Vec<DocId>, doc_id: DocId) {
    if let Ok(pos) = postings.binary_search(&doc_id) {
        postings.remove(pos);
    }
}
