//! # ItemCat Catalog
//!
//! Everything the categorizer knows about categories before it sees any text:
//!
//! - [`LiveCategory`] / [`CategoryId`] - categories as the marketplace stores them
//! - [`KnowledgeBase`] - curated keyword lists and descriptions per canonical name
//! - [`CategoryBinder`] - binds live categories to knowledge entries and picks the default
//! - [`CategorySource`] - the read-only boundary to the category store
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌─────────────────┐
//! │ CategorySource│───>│CategoryBinder│<────│  KnowledgeBase  │
//! │ (live list)  │     │              │     │ (static tables) │
//! └──────────────┘     └──────┬───────┘     └─────────────────┘
//!                             │
//!                      ┌──────┴───────┐
//!                      │CategoryBinding│
//!                      └──────────────┘
//! ```

pub mod binder;
pub mod category;
pub mod knowledge;
pub mod source;

pub use binder::{
    default_category, BindingSource, BoundCategory, CategoryBinder, CategoryBinding,
    DEFAULT_CATEGORY_MARKER, DEFAULT_NAME_MATCH_THRESHOLD,
};
pub use category::{CategoryId, LiveCategory};
pub use knowledge::{name_overlap, KnowledgeBase, KnowledgeEntry};
pub use source::CategorySource;
