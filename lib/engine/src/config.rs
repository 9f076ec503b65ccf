//! Categorizer configuration
//!
//! Defaults reproduce the marketplace's tuned behaviour; a JSON file may
//! override any subset of fields.

use itemcat_catalog::DEFAULT_NAME_MATCH_THRESHOLD;
use itemcat_core::{Error, LexicalConfig, Result, VectorizerConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategorizerConfig {
    /// Weight of the TF-IDF cosine score in the fused score
    pub tfidf_weight: f32,
    /// Weight of the normalised keyword score in the fused score
    pub keyword_weight: f32,
    /// Fused scores below this resolve to the default category
    pub confidence_floor: f32,
    /// Minimum name overlap for a fuzzy knowledge-base match (exclusive)
    pub name_match_threshold: f32,
    /// How many times keywords are repeated in each category's corpus text
    pub keyword_repeat: usize,
    pub vectorizer: VectorizerConfig,
    pub lexical: LexicalConfig,
}

impl Default for CategorizerConfig {
    fn default() -> Self {
        Self {
            tfidf_weight: 0.7,
            keyword_weight: 0.3,
            confidence_floor: 0.1,
            name_match_threshold: DEFAULT_NAME_MATCH_THRESHOLD,
            keyword_repeat: 2,
            vectorizer: VectorizerConfig::default(),
            lexical: LexicalConfig::default(),
        }
    }
}

impl CategorizerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.tfidf_weight.is_finite() || !self.keyword_weight.is_finite() {
            return Err(Error::InvalidConfig("fusion weights must be finite".into()));
        }
        if self.tfidf_weight < 0.0 || self.keyword_weight < 0.0 {
            return Err(Error::InvalidConfig("fusion weights must be non-negative".into()));
        }
        if self.tfidf_weight + self.keyword_weight <= 0.0 {
            return Err(Error::InvalidConfig("fusion weights cannot both be zero".into()));
        }
        if !(0.0..=1.0).contains(&self.confidence_floor) {
            return Err(Error::InvalidConfig(format!(
                "confidence_floor {} outside [0, 1]",
                self.confidence_floor
            )));
        }
        if !(0.0..=1.0).contains(&self.name_match_threshold) {
            return Err(Error::InvalidConfig(format!(
                "name_match_threshold {} outside [0, 1]",
                self.name_match_threshold
            )));
        }
        if self.keyword_repeat == 0 {
            return Err(Error::InvalidConfig("keyword_repeat must be at least 1".into()));
        }
        self.vectorizer.validate()?;
        self.lexical.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = CategorizerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.vectorizer.max_features, 2000);
        assert_eq!(config.vectorizer.ngram_range, (1, 2));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = CategorizerConfig::from_json(r#"{"confidence_floor": 0.25}"#).unwrap();
        assert_eq!(config.confidence_floor, 0.25);
        assert_eq!(config.tfidf_weight, 0.7);
        assert_eq!(config.keyword_repeat, 2);
    }

    #[test]
    fn test_rejects_negative_weight() {
        let config = CategorizerConfig {
            keyword_weight: -0.1,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_non_finite_weights() {
        for weight in [f32::NAN, f32::INFINITY] {
            let config = CategorizerConfig {
                tfidf_weight: weight,
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
        }
        let config = CategorizerConfig {
            keyword_weight: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_keyword_repeat() {
        let config = CategorizerConfig {
            keyword_repeat: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
        assert!(CategorizerConfig::from_json(r#"{"keyword_repeat": 0}"#).is_err());
    }

    #[test]
    fn test_rejects_zero_weights() {
        let config = CategorizerConfig {
            tfidf_weight: 0.0,
            keyword_weight: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_floor_out_of_range() {
        let config = CategorizerConfig {
            confidence_floor: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        let config = CategorizerConfig {
            confidence_floor: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"vectorizer": {"max_features": 50}}"#).unwrap();
        let config = CategorizerConfig::load(&path).unwrap();
        assert_eq!(config.vectorizer.max_features, 50);
        assert!(config.vectorizer.stop_words);
    }
}
