pub mod content;
pub mod filename;

pub use content::{QueryTerms, search_content};
pub use filename::search_file_name;
