//! # ItemCat Core
//!
//! Core scoring primitives for the ItemCat categorizer.
//!
//! - [`SparseVector`] - Sparse term-weight vector with cosine similarity
//! - [`TfIdfIndex`] - TF-IDF vectorizer fitted once over a labelled corpus
//! - [`LexicalScorer`] - Keyword overlap scoring against a [`KeywordSet`]
//!
//! ## Example
//!
//! ```rust
//! use itemcat_core::{TfIdfIndex, VectorizerConfig, KeywordSet, LexicalScorer};
//!
//! let corpus = vec![
//!     (1u64, "guitar piano guitar piano Musical instruments".to_string()),
//!     (2u64, "pot pan pot pan Kitchen items".to_string()),
//! ];
//! let index = TfIdfIndex::fit(corpus, &VectorizerConfig::default()).unwrap();
//! let scores = index.similarity("used guitar").unwrap();
//! assert!(scores[0].1 > scores[1].1);
//!
//! let keywords = KeywordSet::compile(["guitar", "capo"]).unwrap();
//! assert_eq!(LexicalScorer::default().score("Guitar with capo", &keywords), 5.0);
//! ```

pub mod error;
pub mod lexical;
pub mod text;
pub mod tfidf;
pub mod vector;

pub use error::{Error, Result};
pub use lexical::{KeywordSet, LexicalConfig, LexicalScorer};
pub use text::Analyzer;
pub use tfidf::{TfIdfIndex, VectorizerConfig};
pub use vector::SparseVector;
