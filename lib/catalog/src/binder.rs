//! Binding live categories to knowledge-base entries
//!
//! Each live category is matched by exact canonical name, else by the closest
//! name overlap above a threshold, else gets keywords synthesized from its own
//! name. The binder also picks the default ("Others") category.

use crate::category::{CategoryId, LiveCategory};
use crate::knowledge::KnowledgeBase;
use itemcat_core::{text, Error, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Default minimum name overlap for a fuzzy match
pub const DEFAULT_NAME_MATCH_THRESHOLD: f32 = 0.2;

/// Substring marking the catch-all category
pub const DEFAULT_CATEGORY_MARKER: &str = "other";

/// How a live category obtained its keywords
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BindingSource {
    Exact { canonical_name: String },
    Fuzzy { canonical_name: String, similarity: f32 },
    Synthesized,
}

/// A live category with the keywords and description it was bound to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundCategory {
    pub category: LiveCategory,
    /// Lower-cased, de-duplicated, in knowledge-base order
    pub keywords: Vec<String>,
    pub description: String,
    pub source: BindingSource,
}

impl BoundCategory {
    #[inline]
    pub fn id(&self) -> &CategoryId {
        &self.category.id
    }

    /// Synthetic document for the vectorizer: the keywords `repeat` times,
    /// then the description
    pub fn corpus_text(&self, repeat: usize) -> String {
        let joined = self.keywords.join(" ");
        let mut parts: Vec<&str> = std::iter::repeat(joined.as_str()).take(repeat).collect();
        parts.push(self.description.as_str());
        parts.join(" ")
    }
}

/// Result of binding a live-category snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBinding {
    /// In the order the source supplied them
    pub categories: Vec<BoundCategory>,
    pub default_category: CategoryId,
}

impl CategoryBinding {
    pub fn get(&self, id: &CategoryId) -> Option<&BoundCategory> {
        self.categories.iter().find(|c| c.id() == id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct CategoryBinder {
    knowledge: Arc<KnowledgeBase>,
    name_match_threshold: f32,
}

impl Default for CategoryBinder {
    fn default() -> Self {
        Self::new(KnowledgeBase::builtin())
    }
}

impl CategoryBinder {
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self {
            knowledge,
            name_match_threshold: DEFAULT_NAME_MATCH_THRESHOLD,
        }
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.name_match_threshold = threshold;
        self
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Bind a live-category snapshot. Fails with [`Error::NotReady`] only
    /// when `live` is empty.
    pub fn bind(&self, live: &[LiveCategory]) -> Result<CategoryBinding> {
        let default_category = default_category(live).ok_or(Error::NotReady)?;

        let categories = live
            .iter()
            .map(|category| {
                let bound = self.bind_one(category);
                debug!(
                    "Bound category '{}' ({}) via {:?} with {} keywords",
                    category.name,
                    category.id,
                    bound.source,
                    bound.keywords.len()
                );
                bound
            })
            .collect();

        Ok(CategoryBinding {
            categories,
            default_category,
        })
    }

    fn bind_one(&self, category: &LiveCategory) -> BoundCategory {
        if let Some(entry) = self.knowledge.get(&category.name) {
            return BoundCategory {
                category: category.clone(),
                keywords: normalize_keywords(&entry.keywords),
                description: entry.description.clone(),
                source: BindingSource::Exact {
                    canonical_name: entry.canonical_name.clone(),
                },
            };
        }

        if let Some((entry, similarity)) = self.knowledge.closest(&category.name) {
            if similarity > self.name_match_threshold {
                return BoundCategory {
                    category: category.clone(),
                    keywords: normalize_keywords(&entry.keywords),
                    description: entry.description.clone(),
                    source: BindingSource::Fuzzy {
                        canonical_name: entry.canonical_name.clone(),
                        similarity,
                    },
                };
            }
        }

        BoundCategory {
            category: category.clone(),
            keywords: normalize_keywords(&text::words(&category.name)),
            description: format!("Items related to {}", category.name),
            source: BindingSource::Synthesized,
        }
    }
}

/// The last category whose name contains "other" (case-insensitive), else
/// the last category; `None` for an empty list
pub fn default_category(live: &[LiveCategory]) -> Option<CategoryId> {
    live.iter()
        .rev()
        .find(|c| c.name_contains(DEFAULT_CATEGORY_MARKER))
        .or_else(|| live.last())
        .map(|c| c.id.clone())
}

fn normalize_keywords(keywords: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty() && seen.insert(k.clone()))
        .collect()
}
