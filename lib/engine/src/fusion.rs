//! Score fusion
//!
//! Combines per-category TF-IDF similarities with max-normalised keyword
//! scores into one weighted score, and picks the winner.

use itemcat_catalog::CategoryId;
use serde::Serialize;
use std::collections::HashMap;

/// Per-category contribution breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryScore {
    pub id: CategoryId,
    pub name: String,
    pub tfidf: f32,
    pub keyword_raw: f32,
    pub keyword_norm: f32,
    pub fused: f32,
}

/// Item text used for scoring; the name is counted twice when a description
/// is present
pub fn query_text(name: &str, description: &str) -> String {
    if description.is_empty() {
        name.to_string()
    } else {
        format!("{} {} {}", name, name, description)
    }
}

/// Fuse the two signals for every category in `categories` order.
///
/// `keyword_raw` is parallel to `categories`; categories missing from `tfidf`
/// score 0 on that signal.
pub fn fuse(
    categories: &[(CategoryId, String)],
    tfidf: &HashMap<CategoryId, f32>,
    keyword_raw: &[f32],
    tfidf_weight: f32,
    keyword_weight: f32,
) -> Vec<CategoryScore> {
    let max_keyword = keyword_raw.iter().copied().fold(0.0f32, f32::max);
    let normalizer = if max_keyword > 0.0 { max_keyword } else { 1.0 };

    categories
        .iter()
        .zip(keyword_raw)
        .map(|((id, name), &raw)| {
            let tfidf_score = tfidf.get(id).copied().unwrap_or(0.0);
            let keyword_norm = raw / normalizer;
            CategoryScore {
                id: id.clone(),
                name: name.clone(),
                tfidf: tfidf_score,
                keyword_raw: raw,
                keyword_norm,
                fused: tfidf_score * tfidf_weight + keyword_norm * keyword_weight,
            }
        })
        .collect()
}

/// Highest fused score; the earliest entry wins ties
pub fn best(scores: &[CategoryScore]) -> Option<&CategoryScore> {
    scores.iter().fold(None, |best: Option<&CategoryScore>, s| match best {
        Some(b) if b.fused >= s.fused => Some(b),
        _ => Some(s),
    })
}
