use crate::index::types::{IndexConfig, IndexedFile};
use crate::utils::{count_newlines, extract_trigrams, extract_words};
use rayon::prelude::*;
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::UNIX_EPOCH;
use tracing::debug;

/// Index a single file (can run in parallel).
///
/// Returns `None` when the file cannot be read or is not valid UTF-8.
pub fn index_file(path: &Path, config: &IndexConfig) -> Option<IndexedFile> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "Skipping unreadable file");
            return None;
        }
    };
    let content = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(_) => {
            debug!(path = %path.display(), "Skipping non-UTF-8 file");
            return None;
        }
    };

    // Get modification time
    let mtime = path
        .metadata()
        .and_then(|m| m.modified())
        .map(|t| t.duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos() as u64)
        .unwrap_or(0);

    Some(index_content(path.to_path_buf(), &content, mtime, config))
}

/// Derive the indexed form of already-decoded file content
pub fn index_content(path: PathBuf, content: &str, mtime: u64, config: &IndexConfig) -> IndexedFile {
    let lowered = content.to_lowercase();

    IndexedFile {
        path,
        mtime,
        size: content.len() as u64,
        line_count: count_newlines(content.as_bytes()) + 1,
        words: extract_words(&lowered),
        trigrams: extract_trigrams(lowered.as_bytes(), config.max_trigrams_per_file),
    }
}

/// Number of files each worker receives.
///
/// The candidate list is split into `chunks_per_thread` units per hardware
/// thread, but never into units smaller than `min_chunk_size`.
pub fn chunk_size_for(file_count: usize, parallelism: usize, config: &IndexConfig) -> usize {
    let chunk_count = (parallelism * config.chunks_per_thread).max(1);
    file_count
        .div_ceil(chunk_count)
        .max(config.min_chunk_size)
        .max(1)
}

/// Index all candidates on the rayon pool, one work unit per contiguous chunk.
///
/// Each unit accumulates its own results; nothing shared is touched until the
/// caller merges the returned batches.
pub fn index_in_chunks(files: &[PathBuf], config: &IndexConfig) -> Vec<Vec<IndexedFile>> {
    if files.is_empty() {
        return Vec::new();
    }

    let parallelism = thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1);
    let chunk_size = chunk_size_for(files.len(), parallelism, config);
    debug!(
        files = files.len(),
        chunk_size,
        chunks = files.len().div_ceil(chunk_size),
        "Dispatching indexing work"
    );

    files
        .par_chunks(chunk_size)
        .map(|chunk| {
            chunk
                .iter()
                .filter_map(|path| index_file(path, config))
                .collect::<Vec<_>>()
        })
        .collect()
}
