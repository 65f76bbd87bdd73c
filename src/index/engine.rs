//! The shared search index: one coordinator writes, any number of readers query.

use crate::index::build::index_in_chunks;
use crate::index::discovery::discover_files;
use crate::index::store::IndexStore;
use crate::index::types::{BuildReport, ContentMatch, IndexConfig, IndexStats, IndexedFile};
use crate::query::{QueryTerms, search_content, search_file_name};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::thread::{self, JoinHandle};
use std::time::{Instant, SystemTime};
use tracing::{debug, info, warn};

/// In-memory content and filename index over a source tree.
///
/// Builds are exclusive: a second request while one is running returns
/// immediately without touching the index. Queries never wait for a build
/// to finish; during a rebuild they see an empty index until the merged
/// store is swapped in.
pub struct SearchIndex {
    config: IndexConfig,
    store: RwLock<IndexStore>,
    indexing: AtomicBool,
    last_build: RwLock<Option<BuildReport>>,
}

/// Clears the in-progress flag when a build ends, even by panic
struct IndexingGuard<'a>(&'a AtomicBool);

impl Drop for IndexingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchIndex {
    pub fn new() -> Self {
        Self::with_config(IndexConfig::default())
    }

    pub fn with_config(config: IndexConfig) -> Self {
        Self {
            config,
            store: RwLock::new(IndexStore::new()),
            indexing: AtomicBool::new(false),
            last_build: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Rebuild the whole index from `root`, blocking until done.
    ///
    /// Returns `false` without doing anything if another build is running.
    pub fn build_index(&self, root: &Path) -> bool {
        match self.try_begin_build() {
            Some(guard) => {
                self.run_build(root, guard);
                true
            }
            None => false,
        }
    }

    /// Start a rebuild on a background thread.
    ///
    /// The in-progress flag is taken before this returns, so an immediate
    /// second call is already a no-op. Returns `None` in that case.
    pub fn spawn_build(self: &Arc<Self>, root: impl Into<PathBuf>) -> Option<JoinHandle<()>> {
        let guard = self.try_begin_build()?;

        let index = Arc::clone(self);
        let root = root.into();
        let spawned = thread::Builder::new()
            .name("srcdex-build".to_string())
            .spawn(move || {
                let guard = IndexingGuard(&index.indexing);
                index.run_build(&root, guard);
            });
        Self::hand_off(guard, spawned)
    }

    /// The worker thread adopts the flag on success; a failed spawn releases it
    fn hand_off(
        guard: IndexingGuard<'_>,
        spawned: io::Result<JoinHandle<()>>,
    ) -> Option<JoinHandle<()>> {
        match spawned {
            Ok(handle) => {
                std::mem::forget(guard);
                Some(handle)
            }
            Err(err) => {
                warn!(error = %err, "Failed to spawn build thread");
                None
            }
        }
    }

    fn try_begin_build(&self) -> Option<IndexingGuard<'_>> {
        match self
            .indexing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => Some(IndexingGuard(&self.indexing)),
            Err(_) => {
                debug!("Build already in progress, ignoring request");
                None
            }
        }
    }

    fn run_build(&self, root: &Path, _guard: IndexingGuard<'_>) {
        let start = Instant::now();
        info!(root = %root.display(), "Building index");

        self.write_store().clear();

        let candidates = discover_files(root, &self.config);
        let files_discovered = candidates.len();
        debug!(files = files_discovered, "Discovered candidate files");

        let batches = index_in_chunks(&candidates, &self.config);
        let files_indexed: usize = batches.iter().map(Vec::len).sum();

        let mut fresh = IndexStore::new();
        fresh.merge(batches);
        *self.write_store() = fresh;

        let report = BuildReport {
            root: root.to_path_buf(),
            files_discovered,
            files_indexed,
            elapsed: start.elapsed(),
            completed_at: SystemTime::now(),
        };
        info!(
            files = report.files_indexed,
            skipped = report.files_skipped(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "Index build complete"
        );
        *self
            .last_build
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(report);
    }

    /// Files whose content matches `query`, highest score first
    pub fn search_content(&self, query: &str, max_results: usize) -> Vec<ContentMatch> {
        let terms = QueryTerms::parse(query, self.config.max_trigrams_per_file);
        search_content(&self.read_store(), &terms, max_results)
    }

    /// Files whose name fuzzily matches `query`, best first
    pub fn search_file_name(&self, query: &str, max_results: usize) -> Vec<PathBuf> {
        search_file_name(&self.read_store(), query, max_results)
    }

    pub fn get_indexed_file(&self, path: &Path) -> Option<IndexedFile> {
        self.read_store().get(path).cloned()
    }

    pub fn indexed_file_count(&self) -> usize {
        self.read_store().len()
    }

    pub fn is_indexing(&self) -> bool {
        self.indexing.load(Ordering::Acquire)
    }

    /// Report of the most recent completed build, if any
    pub fn last_build(&self) -> Option<BuildReport> {
        self.last_build
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn stats(&self) -> IndexStats {
        self.read_store().stats()
    }

    fn read_store(&self) -> RwLockReadGuard<'_, IndexStore> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_store(&self) -> RwLockWriteGuard<'_, IndexStore> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }
}
