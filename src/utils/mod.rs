//! Utility functions shared by indexing and querying.
//!
//! ## Modules
//!
//! - [`tokenizer`] - Identifier-like word extraction
//! - [`trigram`] - Alphanumeric 3-byte shingles and line counting
//! - [`progress`] - Terminal spinner that becomes a no-op without the `progress` feature
//!
//! ## Key Functions
//!
//! ```
//! use srcdex::utils::{extract_trigrams, extract_words};
//!
//! let text = "fn get_user(id: u32)".to_lowercase();
//! let words = extract_words(&text);
//! assert!(words.contains("get_user"));
//!
//! let trigrams = extract_trigrams(text.as_bytes(), 5_000);
//! assert!(!trigrams.is_empty());
//! ```

pub mod progress;
pub mod tokenizer;
pub mod trigram;

pub use tokenizer::*;
pub use trigram::*;
