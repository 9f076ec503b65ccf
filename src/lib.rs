//! # ItemCat
//!
//! Assigns marketplace items to a category from their free-text name and
//! description when no human-chosen category is available.
//!
//! ## Quick Start
//!
//! ### From the command line
//!
//! ```bash
//! itemcat "Wireless Bluetooth Headphones"
//! itemcat --categories categories.json --description "bedside light" --explain Lamp
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use itemcat::prelude::*;
//! use std::sync::Arc;
//!
//! let store = Arc::new(InMemoryCategoryStore::with_categories(vec![
//!     LiveCategory::new(1u64, "Books & Study Materials"),
//!     LiveCategory::new(2u64, "Electronics & Gadgets"),
//!     LiveCategory::new(3u64, "Others"),
//! ]));
//!
//! let categorizer = Categorizer::new(store);
//! assert!(categorizer.initialize());
//! let id = categorizer.categorize("Organic chemistry textbook", "");
//! assert_eq!(id, Some(CategoryId::Integer(1)));
//! ```
//!
//! ## Crate Structure
//!
//! - [`itemcat-core`](https://docs.rs/itemcat-core) - TF-IDF index, sparse vectors, keyword scoring
//! - [`itemcat-catalog`](https://docs.rs/itemcat-catalog) - Knowledge base, category binding, category source trait
//! - [`itemcat-storage`](https://docs.rs/itemcat-storage) - In-memory and JSON file category stores
//! - [`itemcat-engine`](https://docs.rs/itemcat-engine) - The hybrid categorizer

// Re-export core types
pub use itemcat_core::{
    Error, KeywordSet, LexicalConfig, LexicalScorer, Result, SparseVector, TfIdfIndex,
    VectorizerConfig,
};

// Re-export catalog
pub use itemcat_catalog::{
    CategoryBinder, CategoryBinding, CategoryId, CategorySource, KnowledgeBase, KnowledgeEntry,
    LiveCategory,
};

// Re-export storage
pub use itemcat_storage::{FileCategoryStore, InMemoryCategoryStore};

// Re-export engine
pub use itemcat_engine::{
    Categorizer, CategorizerBuilder, CategorizerConfig, CategorizerState, CategoryScore, Decision,
    Explanation, ItemDraft,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Categorizer, CategorizerConfig, CategoryId, CategorySource, Decision, Error,
        FileCategoryStore, InMemoryCategoryStore, ItemDraft, KnowledgeBase, LiveCategory, Result,
    };
}
