// src/threshold.rs
//! Threshold selection and deterministic ranking.

use crate::document::ScoredDocument;

/// Keep documents with `score >= threshold`, highest score first.
/// `sort_by` is stable, so equal scores keep their input order.
pub fn filter_by_threshold<'a>(
    scored: Vec<ScoredDocument<'a>>,
    threshold: u32,
) -> Vec<ScoredDocument<'a>> {
    let mut kept: Vec<ScoredDocument<'a>> = scored
        .into_iter()
        .filter(|s| s.score() >= threshold)
        .collect();
    kept.sort_by(|a, b| b.score().cmp(&a.score()));
    kept
}

/// Min / max / mean of a score batch, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoreStats {
    pub min: u32,
    pub max: u32,
    pub avg: f64,
}

impl ScoreStats {
    pub fn from_scores<I: IntoIterator<Item = u32>>(scores: I) -> Self {
        let mut n = 0u64;
        let mut sum = 0u64;
        let mut min = u32::MAX;
        let mut max = 0u32;
        for s in scores {
            n += 1;
            sum += u64::from(s);
            min = min.min(s);
            max = max.max(s);
        }
        if n == 0 {
            return Self::default();
        }
        Self {
            min,
            max,
            avg: sum as f64 / n as f64,
        }
    }
}
