use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::domain::Score;
use crate::features::DerivedEntry;

/// Highest total goals still considered a low-scoring outcome.
pub const LOW_SCORING_MAX_GOALS: u64 = 2;

pub const PATTERN_MATCH: f64 = 1.25;
pub const PATTERN_MISMATCH: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum ScoringPattern {
    LowScoring,
    HighScoring,
}
impl ScoringPattern {
    pub fn of(score: &Score) -> Self {
        if score.total() <= LOW_SCORING_MAX_GOALS {
            ScoringPattern::LowScoring
        } else {
            ScoringPattern::HighScoring
        }
    }

    /// The pattern held by the strict majority of entries; an even split resolves to high-scoring.
    pub fn dominant(entries: &[DerivedEntry]) -> Self {
        let low = entries
            .iter()
            .filter(|entry| ScoringPattern::of(&entry.score) == ScoringPattern::LowScoring)
            .count();
        let high = entries.len() - low;
        if low > high {
            ScoringPattern::LowScoring
        } else {
            ScoringPattern::HighScoring
        }
    }
}

pub fn pattern_scores(entries: &[DerivedEntry]) -> Vec<f64> {
    let dominant = ScoringPattern::dominant(entries);
    entries
        .iter()
        .map(|entry| {
            if ScoringPattern::of(&entry.score) == dominant {
                PATTERN_MATCH
            } else {
                PATTERN_MISMATCH
            }
        })
        .collect()
}
