//! Keyword overlap scoring
//!
//! Each keyword contributes `whole_word_weight` per whole-word occurrence in
//! the text, plus a flat `substring_bonus` when a keyword longer than
//! `substring_min_len` characters occurs anywhere as a substring.

use crate::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalConfig {
    pub whole_word_weight: f32,
    pub substring_bonus: f32,
    /// Bonus applies to keywords strictly longer than this
    pub substring_min_len: usize,
}

impl Default for LexicalConfig {
    fn default() -> Self {
        Self {
            whole_word_weight: 2.0,
            substring_bonus: 0.5,
            substring_min_len: 3,
        }
    }
}

impl LexicalConfig {
    pub fn validate(&self) -> Result<()> {
        if self.whole_word_weight < 0.0 || self.substring_bonus < 0.0 {
            return Err(Error::InvalidConfig(
                "lexical weights must be non-negative".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct KeywordMatcher {
    keyword: String,
    whole_word: Regex,
}

/// A category's keywords with their word-boundary patterns compiled once
#[derive(Debug, Clone, Default)]
pub struct KeywordSet {
    matchers: Vec<KeywordMatcher>,
}

impl KeywordSet {
    /// Compile keywords, lower-casing them and skipping blanks and duplicates
    pub fn compile<I, S>(keywords: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut matchers: Vec<KeywordMatcher> = Vec::new();
        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if keyword.is_empty() || matchers.iter().any(|m| m.keyword == keyword) {
                continue;
            }
            let pattern = format!(r"\b{}\b", regex::escape(&keyword));
            let whole_word =
                Regex::new(&pattern).map_err(|e| Error::InvalidKeyword(e.to_string()))?;
            matchers.push(KeywordMatcher { keyword, whole_word });
        }
        Ok(Self { matchers })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.matchers.iter().map(|m| m.keyword.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalScorer {
    config: LexicalConfig,
}

impl LexicalScorer {
    pub fn new(config: LexicalConfig) -> Self {
        Self { config }
    }

    /// Score `text` against one keyword set; always >= 0
    pub fn score(&self, text: &str, keywords: &KeywordSet) -> f32 {
        if keywords.is_empty() {
            return 0.0;
        }

        let text = text.to_lowercase();
        let mut score = 0.0f32;

        for matcher in &keywords.matchers {
            let count = matcher.whole_word.find_iter(&text).count();
            score += count as f32 * self.config.whole_word_weight;

            if matcher.keyword.chars().count() > self.config.substring_min_len
                && text.contains(&matcher.keyword)
            {
                score += self.config.substring_bonus;
            }
        }

        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> KeywordSet {
        KeywordSet::compile(words.iter().copied()).unwrap()
    }

    #[test]
    fn test_whole_word_and_substring_bonus() {
        let scorer = LexicalScorer::default();
        // whole word (2.0) + substring bonus (0.5)
        let score = scorer.score("Wireless Bluetooth Headphone", &set(&["headphone"]));
        assert_eq!(score, 2.5);
    }

    #[test]
    fn test_plural_only_gets_substring_bonus() {
        let scorer = LexicalScorer::default();
        let score = scorer.score("Wireless Bluetooth Headphones", &set(&["headphone", "laptop"]));
        assert_eq!(score, 0.5);
    }

    #[test]
    fn test_short_keyword_has_no_substring_bonus() {
        let scorer = LexicalScorer::default();
        assert_eq!(scorer.score("gaming pc", &set(&["pc"])), 2.0);
        assert_eq!(scorer.score("pcs", &set(&["pc"])), 0.0);
    }

    #[test]
    fn test_counts_every_occurrence() {
        let scorer = LexicalScorer::default();
        assert_eq!(scorer.score("pan pan pan", &set(&["pan"])), 6.0);
    }

    #[test]
    fn test_multi_word_keyword() {
        let scorer = LexicalScorer::default();
        assert_eq!(scorer.score("a Power Bank 10000mAh", &set(&["power bank"])), 2.5);
    }

    #[test]
    fn test_empty_keywords_score_zero() {
        let scorer = LexicalScorer::default();
        assert_eq!(scorer.score("anything at all", &KeywordSet::default()), 0.0);
    }

    #[test]
    fn test_more_occurrences_never_decrease_score() {
        let scorer = LexicalScorer::default();
        let keywords = set(&["guitar", "capo"]);
        let mut text = String::from("acoustic");
        let mut previous = scorer.score(&text, &keywords);
        for _ in 0..5 {
            text.push_str(" guitar");
            let next = scorer.score(&text, &keywords);
            assert!(next >= previous);
            previous = next;
        }
    }

    #[test]
    fn test_compile_dedups_and_lowercases() {
        let keywords = set(&["VR", "vr", " ", "Cup", "cup"]);
        assert_eq!(keywords.keywords().collect::<Vec<_>>(), vec!["vr", "cup"]);
    }
}
