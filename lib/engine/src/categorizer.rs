//! Hybrid categorizer
//!
//! A long-lived, shareable service. It starts uninitialized, pulls the live
//! categories from its [`CategorySource`] on first use (or on
//! [`Categorizer::initialize`]), binds them to the knowledge base and fits the
//! TF-IDF index once. A failed initialization leaves it uninitialized so the
//! next call retries; once ready its state never changes.

use crate::config::CategorizerConfig;
use crate::explain::{Decision, Explanation};
use crate::fusion::{best, fuse, query_text};
use itemcat_catalog::{
    CategoryBinder, CategoryBinding, CategoryId, CategorySource, KnowledgeBase, LiveCategory,
    DEFAULT_CATEGORY_MARKER,
};
use itemcat_core::{Error, KeywordSet, LexicalScorer, Result, TfIdfIndex};
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Lifecycle of a [`Categorizer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorizerState {
    Uninitialized,
    Ready,
}

/// Immutable state built by a successful initialization
struct ReadyState {
    binding: CategoryBinding,
    // parallel to binding.categories
    keywords: Vec<KeywordSet>,
    labels: Vec<(CategoryId, String)>,
    // None when the fit produced no vocabulary
    index: Option<TfIdfIndex<CategoryId>>,
}

pub struct Categorizer {
    source: Arc<dyn CategorySource>,
    binder: CategoryBinder,
    lexical: LexicalScorer,
    config: CategorizerConfig,
    state: OnceCell<ReadyState>,
}

impl std::fmt::Debug for Categorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Categorizer")
            .field("state", &self.state())
            .field("config", &self.config)
            .finish()
    }
}

impl Categorizer {
    /// Categorizer over `source` with the built-in knowledge base and defaults
    pub fn new(source: Arc<dyn CategorySource>) -> Self {
        Self::from_parts(source, KnowledgeBase::builtin(), CategorizerConfig::default())
    }

    pub fn builder(source: Arc<dyn CategorySource>) -> CategorizerBuilder {
        CategorizerBuilder::new(source)
    }

    fn from_parts(
        source: Arc<dyn CategorySource>,
        knowledge: Arc<KnowledgeBase>,
        config: CategorizerConfig,
    ) -> Self {
        Self {
            source,
            binder: CategoryBinder::new(knowledge).with_threshold(config.name_match_threshold),
            lexical: LexicalScorer::new(config.lexical),
            config,
            state: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &CategorizerConfig {
        &self.config
    }

    pub fn state(&self) -> CategorizerState {
        if self.state.get().is_some() {
            CategorizerState::Ready
        } else {
            CategorizerState::Uninitialized
        }
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.state() == CategorizerState::Ready
    }

    /// Eagerly build the categorizer state. Returns `false` when the source has
    /// no categories (or failed); a later call may still succeed.
    pub fn initialize(&self) -> bool {
        self.ensure_ready().is_ok()
    }

    /// Default category of the bound snapshot, once ready
    pub fn default_category(&self) -> Option<&CategoryId> {
        self.state.get().map(|s| &s.binding.default_category)
    }

    /// Bound snapshot, once ready
    pub fn binding(&self) -> Option<&CategoryBinding> {
        self.state.get().map(|s| &s.binding)
    }

    /// Live categories the categorizer was initialized with, in source order
    pub fn categories(&self) -> Vec<LiveCategory> {
        self.binding()
            .map(|b| b.categories.iter().map(|c| c.category.clone()).collect())
            .unwrap_or_default()
    }

    /// Pick a category for an item; `None` only when no category exists anywhere
    pub fn categorize(&self, name: &str, description: &str) -> Option<CategoryId> {
        self.decide(name, description).into_category()
    }

    pub fn decide(&self, name: &str, description: &str) -> Decision {
        self.explain(name, description).decision
    }

    /// Decide and report every category's score breakdown
    pub fn explain(&self, name: &str, description: &str) -> Explanation {
        let query = query_text(name, description);

        let state = match self.ensure_ready() {
            Ok(state) => state,
            Err(_) => {
                return Explanation {
                    query,
                    scores: Vec::new(),
                    decision: self.fallback(),
                }
            }
        };

        let tfidf = self.tfidf_scores(state, &query);
        let keyword_raw: Vec<f32> = state
            .keywords
            .iter()
            .map(|keywords| self.lexical.score(&query, keywords))
            .collect();

        let scores = fuse(
            &state.labels,
            &tfidf,
            &keyword_raw,
            self.config.tfidf_weight,
            self.config.keyword_weight,
        );
        for score in &scores {
            debug!(
                "'{}' vs '{}': tfidf={:.3} keyword={:.2} fused={:.3}",
                name, score.name, score.tfidf, score.keyword_raw, score.fused
            );
        }

        let default_category = state.binding.default_category.clone();
        let decision = match best(&scores) {
            Some(winner) => {
                info!(
                    "Categorized '{}' as '{}' with score {:.2}",
                    name, winner.name, winner.fused
                );
                if winner.fused < self.config.confidence_floor {
                    info!(
                        "Low confidence score ({:.2}), using default category",
                        winner.fused
                    );
                    Decision::LowConfidence {
                        category: default_category,
                        best: Some(winner.id.clone()),
                        score: winner.fused,
                    }
                } else {
                    Decision::Matched {
                        category: winner.id.clone(),
                        score: winner.fused,
                    }
                }
            }
            None => {
                warn!("No category scored for '{}', using default category", name);
                Decision::LowConfidence {
                    category: default_category,
                    best: None,
                    score: 0.0,
                }
            }
        };

        Explanation {
            query,
            scores,
            decision,
        }
    }

    fn ensure_ready(&self) -> Result<&ReadyState> {
        self.state.get_or_try_init(|| {
            let state = self.build_state();
            match &state {
                Ok(ready) => info!(
                    "Categorizer initialized with {} categories (default: {})",
                    ready.binding.len(),
                    ready.binding.default_category
                ),
                Err(Error::NotReady) => warn!("No categories found in category source"),
                Err(e) if e.is_recoverable() => {
                    warn!("Categorizer not ready, retrying on next call: {}", e)
                }
                Err(e) => error!("Error initializing categorizer: {}", e),
            }
            state
        })
    }

    fn build_state(&self) -> Result<ReadyState> {
        let live = self.source.list()?;
        let binding = self.binder.bind(&live)?;

        let keywords = binding
            .categories
            .iter()
            .map(|c| KeywordSet::compile(&c.keywords))
            .collect::<Result<Vec<_>>>()?;

        let labels = binding
            .categories
            .iter()
            .map(|c| (c.id().clone(), c.category.name.clone()))
            .collect();

        let corpus = binding
            .categories
            .iter()
            .map(|c| (c.id().clone(), c.corpus_text(self.config.keyword_repeat)))
            .collect();

        let index = match TfIdfIndex::fit(corpus, &self.config.vectorizer) {
            Ok(index) => {
                debug!("TF-IDF index fitted with {} terms", index.vocabulary_len());
                Some(index)
            }
            Err(e) => {
                error!("Error initializing TF-IDF: {}", e);
                None
            }
        };

        Ok(ReadyState {
            binding,
            keywords,
            labels,
            index,
        })
    }

    fn tfidf_scores(&self, state: &ReadyState, query: &str) -> HashMap<CategoryId, f32> {
        let Some(index) = &state.index else {
            return HashMap::new();
        };
        match index.similarity(query) {
            Ok(scores) => scores.into_iter().collect(),
            Err(e) => {
                error!("Error computing TF-IDF similarity: {}", e);
                HashMap::new()
            }
        }
    }

    /// Degraded path when the categorizer cannot initialize: the store's
    /// catch-all category, else its first category
    fn fallback(&self) -> Decision {
        let lookup = self
            .source
            .find_name_containing(DEFAULT_CATEGORY_MARKER)
            .and_then(|found| match found {
                Some(category) => Ok(Some(category)),
                None => self.source.first(),
            });

        match lookup {
            Ok(Some(category)) => {
                warn!(
                    "Categorizer not ready, falling back to category '{}'",
                    category.name
                );
                Decision::Fallback { category: category.id }
            }
            Ok(None) => {
                warn!("No categories available, leaving item uncategorized");
                Decision::Undecided
            }
            Err(e) => {
                error!("Fallback category lookup failed: {}", e);
                Decision::Undecided
            }
        }
    }
}

/// Builder for a [`Categorizer`] with a custom knowledge base or config
pub struct CategorizerBuilder {
    source: Arc<dyn CategorySource>,
    knowledge: Arc<KnowledgeBase>,
    config: CategorizerConfig,
}

impl CategorizerBuilder {
    pub fn new(source: Arc<dyn CategorySource>) -> Self {
        Self {
            source,
            knowledge: KnowledgeBase::builtin(),
            config: CategorizerConfig::default(),
        }
    }

    pub fn knowledge(mut self, knowledge: Arc<KnowledgeBase>) -> Self {
        self.knowledge = knowledge;
        self
    }

    pub fn config(mut self, config: CategorizerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<Categorizer> {
        self.config.validate()?;
        Ok(Categorizer::from_parts(self.source, self.knowledge, self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itemcat_catalog::KnowledgeEntry;
    use itemcat_storage::InMemoryCategoryStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const BUILTIN_NAMES: [&str; 10] = [
        "Electronics & Gadgets",
        "Kitchen & Cooking",
        "Books & Study Materials",
        "Sports & Fitness Gear",
        "Musical Instruments",
        "Dorm & Bedroom Essentials",
        "Room Decor",
        "Community & Shared Resources",
        "Digital Subscriptions & Accounts",
        "Others",
    ];

    fn marketplace() -> Arc<InMemoryCategoryStore> {
        let categories = BUILTIN_NAMES
            .iter()
            .enumerate()
            .map(|(i, name)| LiveCategory::new(i as u64 + 1, *name))
            .collect();
        Arc::new(InMemoryCategoryStore::with_categories(categories))
    }

    fn id(i: u64) -> CategoryId {
        CategoryId::Integer(i)
    }

    /// Source whose listing fails while the catch-all lookups still work
    struct ListFailingSource {
        categories: Vec<LiveCategory>,
    }

    impl CategorySource for ListFailingSource {
        fn list(&self) -> Result<Vec<LiveCategory>> {
            Err(Error::Source("connection refused".into()))
        }

        fn find_name_containing(&self, needle: &str) -> Result<Option<LiveCategory>> {
            Ok(self.categories.iter().find(|c| c.name_contains(needle)).cloned())
        }

        fn first(&self) -> Result<Option<LiveCategory>> {
            Ok(self.categories.as_slice().first().cloned())
        }
    }

    struct CountingSource {
        inner: Vec<LiveCategory>,
        calls: AtomicUsize,
    }

    impl CategorySource for CountingSource {
        fn list(&self) -> Result<Vec<LiveCategory>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.inner.clone())
        }
    }

    #[test]
    fn test_categorizes_by_keywords_and_description() {
        let categorizer = Categorizer::new(marketplace());
        assert_eq!(categorizer.categorize("Wireless Bluetooth Headphones", ""), Some(id(1)));
        assert_eq!(categorizer.categorize("Guitar", ""), Some(id(5)));
        assert_eq!(categorizer.categorize("Lamp", "bedside light"), Some(id(7)));
        assert_eq!(categorizer.categorize("Yoga mat", "barely used, for the gym"), Some(id(4)));
    }

    #[test]
    fn test_no_signal_resolves_to_default() {
        let categorizer = Categorizer::new(marketplace());
        let decision = categorizer.decide("xyzzy", "");
        assert_eq!(
            decision,
            Decision::LowConfidence { category: id(10), best: Some(id(1)), score: 0.0 }
        );
    }

    #[test]
    fn test_confidence_floor_returns_default() {
        let config = CategorizerConfig {
            confidence_floor: 1.0,
            ..Default::default()
        };
        let categorizer = Categorizer::builder(marketplace()).config(config).build().unwrap();
        let decision = categorizer.decide("Guitar", "");
        match decision {
            Decision::LowConfidence { category, best, score } => {
                assert_eq!(category, id(10));
                assert_eq!(best, Some(id(5)));
                assert!(score < 1.0);
            }
            other => panic!("expected low confidence, got {:?}", other),
        }
    }

    #[test]
    fn test_deterministic() {
        let categorizer = Categorizer::new(marketplace());
        let first = categorizer.categorize("Calculator", "scientific, for math course");
        for _ in 0..10 {
            assert_eq!(categorizer.categorize("Calculator", "scientific, for math course"), first);
        }
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let source = Arc::new(CountingSource {
            inner: vec![LiveCategory::new(1u64, "Books"), LiveCategory::new(2u64, "Others")],
            calls: AtomicUsize::new(0),
        });
        let categorizer = Categorizer::new(source.clone());
        assert!(categorizer.initialize());
        let categories = categorizer.categories();
        assert!(categorizer.initialize());
        assert_eq!(categorizer.categories(), categories);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(categorizer.default_category(), Some(&id(2)));
    }

    #[test]
    fn test_empty_source_retries_until_categories_exist() {
        let store = Arc::new(InMemoryCategoryStore::new());
        let categorizer = Categorizer::new(store.clone());

        assert!(!categorizer.initialize());
        assert_eq!(categorizer.state(), CategorizerState::Uninitialized);
        assert_eq!(categorizer.categorize("Guitar", ""), None);

        store.insert(LiveCategory::new(1u64, "Musical Instruments"));
        store.insert(LiveCategory::new(2u64, "Others"));
        assert_eq!(categorizer.categorize("Guitar", ""), Some(id(1)));
        assert_eq!(categorizer.state(), CategorizerState::Ready);
    }

    #[test]
    fn test_ready_state_ignores_later_store_changes() {
        let store = marketplace();
        let categorizer = Categorizer::new(store.clone());
        assert!(categorizer.initialize());
        store.insert(LiveCategory::new(11u64, "Guitars"));
        assert_eq!(categorizer.categories().len(), 10);
    }

    #[test]
    fn test_degraded_fallback_prefers_other() {
        let source = ListFailingSource {
            categories: vec![LiveCategory::new(1u64, "Books"), LiveCategory::new(3u64, "Others")],
        };
        let categorizer = Categorizer::new(Arc::new(source));
        assert!(!categorizer.initialize());
        assert_eq!(categorizer.decide("Guitar", ""), Decision::Fallback { category: id(3) });
    }

    #[test]
    fn test_degraded_fallback_uses_first() {
        let source = ListFailingSource {
            categories: vec![LiveCategory::new(1u64, "Books"), LiveCategory::new(2u64, "Gadgets")],
        };
        let categorizer = Categorizer::new(Arc::new(source));
        assert_eq!(categorizer.categorize("Guitar", ""), Some(id(1)));
    }

    #[test]
    fn test_ties_follow_source_order() {
        let knowledge = Arc::new(KnowledgeBase::from_entries(Vec::new()));
        let store = Arc::new(InMemoryCategoryStore::with_categories(vec![
            LiveCategory::new(2u64, "Widgets"),
            LiveCategory::new(1u64, "Widgets"),
        ]));
        let categorizer = Categorizer::builder(store).knowledge(knowledge).build().unwrap();
        assert_eq!(categorizer.categorize("widgets", ""), Some(id(2)));
    }

    #[test]
    fn test_empty_vocabulary_still_uses_keywords() {
        // Every corpus term is a stop word, so the TF-IDF fit fails
        let knowledge = Arc::new(KnowledgeBase::from_entries(vec![
            KnowledgeEntry::new("Alpha", &["the"], "of"),
            KnowledgeEntry::new("Beta", &["and"], "or"),
        ]));
        let store = Arc::new(InMemoryCategoryStore::with_categories(vec![
            LiveCategory::new(1u64, "Alpha"),
            LiveCategory::new(2u64, "Beta"),
        ]));
        let categorizer = Categorizer::builder(store).knowledge(knowledge).build().unwrap();
        let explanation = categorizer.explain("and", "");
        assert!(explanation.scores.iter().all(|s| s.tfidf == 0.0));
        // keyword only: 0.3 * 1.0 clears the floor
        assert_eq!(explanation.decision.category(), Some(&id(2)));
    }

    #[test]
    fn test_explain_reports_every_category() {
        let categorizer = Categorizer::new(marketplace());
        let explanation = categorizer.explain("Lamp", "bedside light");
        assert_eq!(explanation.query, "Lamp Lamp bedside light");
        assert_eq!(explanation.scores.len(), 10);
        assert!(explanation.scores.iter().all(|s| (0.0..=1.0).contains(&s.tfidf)));
        assert_eq!(explanation.ranked()[0].id, id(7));
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        let config = CategorizerConfig {
            confidence_floor: -1.0,
            ..Default::default()
        };
        assert!(Categorizer::builder(marketplace()).config(config).build().is_err());
    }

    #[test]
    fn test_concurrent_first_use_initializes_once() {
        let source = Arc::new(CountingSource {
            inner: BUILTIN_NAMES
                .iter()
                .enumerate()
                .map(|(i, name)| LiveCategory::new(i as u64 + 1, *name))
                .collect(),
            calls: AtomicUsize::new(0),
        });
        let categorizer = Arc::new(Categorizer::new(source.clone()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let categorizer = categorizer.clone();
                std::thread::spawn(move || categorizer.categorize("Guitar", "acoustic"))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Some(id(5)));
        }
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }
}
