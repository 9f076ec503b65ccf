//! Categorization outcomes and their explanations

use crate::fusion::CategoryScore;
use itemcat_catalog::CategoryId;
use serde::Serialize;

/// How a categorization request was resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Decision {
    /// The best category cleared the confidence floor
    Matched { category: CategoryId, score: f32 },
    /// No category cleared the floor (or none scored); the default was used
    LowConfidence {
        category: CategoryId,
        best: Option<CategoryId>,
        score: f32,
    },
    /// The categorizer could not initialize; the store's catch-all was used
    Fallback { category: CategoryId },
    /// No category could be determined at all
    Undecided,
}

impl Decision {
    pub fn category(&self) -> Option<&CategoryId> {
        match self {
            Decision::Matched { category, .. }
            | Decision::LowConfidence { category, .. }
            | Decision::Fallback { category } => Some(category),
            Decision::Undecided => None,
        }
    }

    pub fn into_category(self) -> Option<CategoryId> {
        match self {
            Decision::Matched { category, .. }
            | Decision::LowConfidence { category, .. }
            | Decision::Fallback { category } => Some(category),
            Decision::Undecided => None,
        }
    }

    #[inline]
    pub fn is_confident(&self) -> bool {
        matches!(self, Decision::Matched { .. })
    }
}

/// A decision with the per-category scores that produced it
#[derive(Debug, Clone, Serialize)]
pub struct Explanation {
    /// Text actually scored
    pub query: String,
    /// Every live category, in source order; empty on the fallback path
    pub scores: Vec<CategoryScore>,
    pub decision: Decision,
}

impl Explanation {
    /// Scores sorted by fused score, highest first
    pub fn ranked(&self) -> Vec<&CategoryScore> {
        let mut ranked: Vec<&CategoryScore> = self.scores.iter().collect();
        ranked.sort_by(|a, b| b.fused.partial_cmp(&a.fused).unwrap_or(std::cmp::Ordering::Equal));
        ranked
    }
}
