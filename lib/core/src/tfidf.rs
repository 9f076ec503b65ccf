// TF-IDF vector index over a small labelled corpus
use crate::text::Analyzer;
use crate::{Error, Result, SparseVector};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Vectorizer settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerConfig {
    /// Keep only this many terms, ranked by total corpus frequency
    pub max_features: usize,
    /// Inclusive (min, max) n-gram lengths
    pub ngram_range: (usize, usize),
    /// Drop English stop words before building n-grams
    pub stop_words: bool,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            max_features: 2000,
            ngram_range: (1, 2),
            stop_words: true,
        }
    }
}

impl VectorizerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_features == 0 {
            return Err(Error::InvalidConfig("max_features must be positive".into()));
        }
        let (min, max) = self.ngram_range;
        if min == 0 || min > max {
            return Err(Error::InvalidConfig(format!(
                "invalid ngram_range ({}, {})",
                min, max
            )));
        }
        Ok(())
    }

    fn analyzer(&self) -> Analyzer {
        Analyzer {
            ngram_min: self.ngram_range.0,
            ngram_max: self.ngram_range.1,
            stop_words: self.stop_words,
        }
    }
}

/// Fitted TF-IDF model plus one unit vector per document.
///
/// The vocabulary and idf weights are fixed at [`TfIdfIndex::fit`]; queries are
/// projected into the same space and never refit it.
#[derive(Debug, Clone)]
pub struct TfIdfIndex<K> {
    analyzer: Analyzer,
    // term -> dimension
    vocabulary: AHashMap<String, u32>,
    // dimension -> idf
    idf: Vec<f32>,
    // documents in fit order
    documents: Vec<(K, SparseVector)>,
}

impl<K: Clone> TfIdfIndex<K> {
    /// Fit the vectorizer on `corpus` and store each document's weighted vector
    pub fn fit(corpus: Vec<(K, String)>, config: &VectorizerConfig) -> Result<Self> {
        config.validate()?;
        let analyzer = config.analyzer();
        let n_docs = corpus.len() as f32;

        let mut doc_counts: Vec<(K, AHashMap<String, u32>)> = Vec::with_capacity(corpus.len());
        let mut total_tf: AHashMap<String, u64> = AHashMap::new();
        let mut doc_freq: AHashMap<String, u32> = AHashMap::new();

        for (key, text) in corpus {
            let mut counts: AHashMap<String, u32> = AHashMap::new();
            for term in analyzer.analyze(&text) {
                *counts.entry(term).or_insert(0) += 1;
            }
            for (term, tf) in &counts {
                *total_tf.entry(term.clone()).or_insert(0) += u64::from(*tf);
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
            doc_counts.push((key, counts));
        }

        if total_tf.is_empty() {
            return Err(Error::EmptyVocabulary);
        }

        // Most frequent terms first, lexicographic on ties
        let mut ranked: Vec<(String, u64)> = total_tf.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(config.max_features);

        let mut terms: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        terms.sort();

        let mut vocabulary = AHashMap::with_capacity(terms.len());
        let mut idf = Vec::with_capacity(terms.len());
        for (idx, term) in terms.into_iter().enumerate() {
            let df = doc_freq.get(&term).copied().unwrap_or(0) as f32;
            // Smoothed idf: ln((1 + n) / (1 + df)) + 1
            idf.push(((1.0 + n_docs) / (1.0 + df)).ln() + 1.0);
            vocabulary.insert(term, idx as u32);
        }

        let mut index = Self {
            analyzer,
            vocabulary,
            idf,
            documents: Vec::with_capacity(doc_counts.len()),
        };

        for (key, counts) in doc_counts {
            let vector = index.weigh(counts.iter().map(|(t, c)| (t.as_str(), *c)));
            index.documents.push((key, vector));
        }

        Ok(index)
    }

    #[inline]
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.vocabulary.contains_key(term)
    }

    /// Stored vector for each document, in fit order
    pub fn documents(&self) -> &[(K, SparseVector)] {
        &self.documents
    }

    /// Project text into the fitted space; out-of-vocabulary terms are ignored
    pub fn project(&self, text: &str) -> Result<SparseVector> {
        if self.vocabulary.is_empty() {
            return Err(Error::Projection("index has no vocabulary".into()));
        }

        let mut counts: AHashMap<String, u32> = AHashMap::new();
        for term in self.analyzer.analyze(text) {
            *counts.entry(term).or_insert(0) += 1;
        }

        Ok(self.weigh(counts.iter().map(|(t, c)| (t.as_str(), *c))))
    }

    /// Cosine similarity of `text` against every document, clamped to [0, 1]
    pub fn similarity(&self, text: &str) -> Result<Vec<(K, f32)>> {
        let query = self.project(text)?;
        Ok(self
            .documents
            .iter()
            .map(|(key, doc)| (key.clone(), query.dot(doc).clamp(0.0, 1.0)))
            .collect())
    }

    fn weigh<'a>(&self, counts: impl Iterator<Item = (&'a str, u32)>) -> SparseVector {
        let pairs = counts
            .filter_map(|(term, tf)| {
                self.vocabulary
                    .get(term)
                    .map(|&idx| (idx, tf as f32 * self.idf[idx as usize]))
            })
            .collect();
        SparseVector::from_pairs(pairs).normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<(u32, String)> {
        vec![
            (1, "laptop phone charger laptop phone charger Electronic devices".to_string()),
            (2, "guitar piano drum guitar piano drum Musical instruments".to_string()),
            (3, "pot pan kettle pot pan kettle Kitchen items for cooking".to_string()),
        ]
    }

    #[test]
    fn test_fit_builds_one_vector_per_document() {
        let index = TfIdfIndex::fit(corpus(), &VectorizerConfig::default()).unwrap();
        assert_eq!(index.len(), 3);
        assert!(index.contains_term("laptop"));
        assert!(index.contains_term("laptop phone"));
        assert!(!index.contains_term("for"));
        for (_, v) in index.documents() {
            assert!((v.norm() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_similarity_prefers_matching_document() {
        let index = TfIdfIndex::fit(corpus(), &VectorizerConfig::default()).unwrap();
        let scores = index.similarity("old acoustic guitar").unwrap();
        let best = scores
            .iter()
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap())
            .unwrap();
        assert_eq!(best.0, 2);
        assert!(scores.iter().all(|(_, s)| (0.0..=1.0).contains(s)));
    }

    #[test]
    fn test_out_of_vocabulary_query_scores_zero() {
        let index = TfIdfIndex::fit(corpus(), &VectorizerConfig::default()).unwrap();
        let scores = index.similarity("xyzzy quantum").unwrap();
        assert!(scores.iter().all(|(_, s)| *s == 0.0));
    }

    #[test]
    fn test_max_features_caps_vocabulary() {
        let config = VectorizerConfig {
            max_features: 5,
            ..Default::default()
        };
        let index = TfIdfIndex::fit(corpus(), &config).unwrap();
        assert_eq!(index.vocabulary_len(), 5);
    }

    #[test]
    fn test_stop_word_only_corpus_is_empty_vocabulary() {
        let corpus = vec![(1u32, "the of and".to_string())];
        let result = TfIdfIndex::fit(corpus, &VectorizerConfig::default());
        assert!(matches!(result, Err(Error::EmptyVocabulary)));
    }

    #[test]
    fn test_invalid_ngram_range_rejected() {
        let config = VectorizerConfig {
            ngram_range: (2, 1),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }
}
