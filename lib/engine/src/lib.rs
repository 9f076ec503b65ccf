//! # ItemCat Engine
//!
//! Hybrid categorizer for marketplace items: keyword overlap plus TF-IDF
//! cosine similarity, fused with fixed weights, a confidence floor and a
//! deterministic default.
//!
//! ## Example
//!
//! ```rust
//! use itemcat_catalog::LiveCategory;
//! use itemcat_engine::Categorizer;
//! use std::sync::Arc;
//!
//! let categories = vec![
//!     LiveCategory::new(1u64, "Musical Instruments"),
//!     LiveCategory::new(2u64, "Kitchen & Cooking"),
//!     LiveCategory::new(3u64, "Others"),
//! ];
//! let categorizer = Categorizer::new(Arc::new(categories));
//!
//! let id = categorizer.categorize("Acoustic guitar", "");
//! assert_eq!(id.map(|c| c.to_string()), Some("1".into()));
//! assert_eq!(categorizer.categorize("zzz", "").map(|c| c.to_string()), Some("3".into()));
//! ```
//!
//! ## Scoring
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐
//! │  item text  │────>│ TfIdfIndex   │──┐ 0.7 × cosine
//! │ (name ×2 +  │     └──────────────┘  │
//! │ description)│     ┌──────────────┐  ├──> fused ──> floor ──> category
//! │             │────>│ LexicalScorer│──┘ 0.3 × keyword / max
//! └─────────────┘     └──────────────┘
//! ```

pub mod categorizer;
pub mod config;
pub mod explain;
pub mod fusion;
pub mod item;

pub use categorizer::{Categorizer, CategorizerBuilder, CategorizerState};
pub use config::CategorizerConfig;
pub use explain::{Decision, Explanation};
pub use fusion::{query_text, CategoryScore};
pub use item::ItemDraft;
