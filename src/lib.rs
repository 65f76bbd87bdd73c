//! # srcdex - in-memory source search index
//!
//! srcdex scans a source tree in parallel and keeps two inverted indexes in
//! memory so an interactive tool can answer "which files mention X" and
//! "which file is named roughly X" without shelling out to a search engine.
//!
//! ## Architecture
//!
//! - [`index`] - Discovery, per-file indexing, parallel build and the shared store
//! - [`query`] - Content scoring and fuzzy filename matching
//! - [`output`] - Result formatting for the command line
//! - [`utils`] - Word and trigram extraction, progress spinner
//!
//! ## Quick Start
//!
//! ```no_run
//! use srcdex::SearchIndex;
//! use std::path::Path;
//!
//! let index = SearchIndex::new();
//! index.build_index(Path::new("/path/to/codebase"));
//!
//! for hit in index.search_content("parse config", 10) {
//!     println!("{:>4}  {}", hit.score, hit.path.display());
//! }
//! for path in index.search_file_name("cfgldr", 5) {
//!     println!("{}", path.display());
//! }
//! ```
//!
//! ## Scoring
//!
//! Content search adds 10 per exact word hit, 5 per indexed word extending a
//! query word, and 1 per shared alphanumeric trigram. Every build replaces
//! the whole index; nothing is written to disk.

pub mod index;
pub mod output;
pub mod query;
pub mod utils;

pub use index::{BuildReport, ContentMatch, IndexConfig, IndexStats, IndexedFile, SearchIndex};
