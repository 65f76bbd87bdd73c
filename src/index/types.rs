use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// Position of a file in the store's document table
pub type DocId = u32;

/// A trigram is a 3-byte sequence stored as u32 (only lower 24 bits used)
pub type Trigram = u32;

/// One successfully indexed file.
///
/// Word and trigram sets are derived from the lowercased content and are
/// kept sorted so two builds over the same bytes compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedFile {
    pub path: PathBuf,
    /// Modification time in nanoseconds since the unix epoch (0 if unknown)
    pub mtime: u64,
    pub size: u64,
    pub line_count: usize,
    pub words: BTreeSet<String>,
    pub trigrams: BTreeSet<Trigram>,
}

/// Tunables for discovery and per-file indexing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Files larger than this many bytes are never indexed
    pub max_file_size: u64,
    /// Trigram collection for a single file stops at this many distinct trigrams
    pub max_trigrams_per_file: usize,
    /// Lower bound on the number of files handed to one worker
    pub min_chunk_size: usize,
    /// Work units per available hardware thread
    pub chunks_per_thread: usize,
    /// Allowed file extensions, compared case-insensitively
    pub extensions: Vec<String>,
    /// Directory names whose whole subtree is skipped
    pub ignored_dirs: Vec<String>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            max_file_size: 1_000_000,
            max_trigrams_per_file: 5_000,
            min_chunk_size: 10,
            chunks_per_thread: 2,
            extensions: [
                "rs", "py", "pyi", "js", "mjs", "cjs", "ts", "tsx", "jsx", "go", "c", "h", "cpp",
                "cc", "cxx", "hpp", "hh", "java", "kt", "kts", "scala", "swift", "cs", "rb", "php",
                "lua", "pl", "pm", "r", "dart", "ex", "exs", "erl", "hs", "ml", "mli", "clj",
                "zig", "nim", "sh", "bash", "zsh", "fish", "ps1", "sql", "html", "htm", "css",
                "scss", "sass", "less", "vue", "svelte", "md", "markdown", "rst", "txt", "json",
                "yaml", "yml", "toml", "ini", "cfg", "xml", "graphql", "proto", "gradle", "cmake",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            ignored_dirs: [
                "node_modules", ".git", ".hg", ".svn", "__pycache__", ".venv", "venv", "env",
                "target", "build", "dist", "out", ".next", ".nuxt", ".cache", ".idea", ".vscode",
                "vendor", "coverage", ".tox", ".mypy_cache", ".pytest_cache", "bower_components",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl IndexConfig {
    /// Load a config from a JSON file; missing fields fall back to defaults
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }
}

/// Outcome of the most recent completed build
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub root: PathBuf,
    pub files_discovered: usize,
    pub files_indexed: usize,
    pub elapsed: Duration,
    pub completed_at: SystemTime,
}

impl BuildReport {
    /// Candidates that were found but could not be read or decoded
    pub fn files_skipped(&self) -> usize {
        self.files_discovered.saturating_sub(self.files_indexed)
    }
}

/// Size summary of the current index contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub files: usize,
    pub words: usize,
    pub trigrams: usize,
    pub total_bytes: u64,
    pub total_lines: usize,
}

/// A content search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentMatch {
    pub path: PathBuf,
    pub score: u32,
}

/// Convert 3 bytes to a trigram
#[inline]
pub fn bytes_to_trigram(b0: u8, b1: u8, b2: u8) -> Trigram {
    ((b0 as u32) << 16) | ((b1 as u32) << 8) | (b2 as u32)
}

/// Convert trigram back to bytes
#[inline]
pub fn trigram_to_bytes(t: Trigram) -> [u8; 3] {
    [
        ((t >> 16) & 0xFF) as u8,
        ((t >> 8) & 0xFF) as u8,
        (t & 0xFF) as u8,
    ]
}
