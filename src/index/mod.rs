pub mod build;
pub mod discovery;
pub mod engine;
pub mod store;
pub mod types;

pub use engine::SearchIndex;
pub use store::IndexStore;
pub use types::*;
