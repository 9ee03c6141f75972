//! Ordering of scored entries and selection of the headline and alternative predictions.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::features::DerivedEntry;
use crate::stats::round_to;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPrediction {
    pub score: String,
    pub probability: f64,
    pub final_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternativeScore {
    pub score: String,
    pub probability: u8,
    pub coefficient: f64,
}

/// Sorts by final score, best first. The sort is stable, so tied entries keep their input order.
pub fn rank(entries: &mut [DerivedEntry]) {
    entries.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));
}

/// The leading `count` entries, with probability rounded to an integer and the final score to
/// two decimal places.
pub fn top_predictions(ranked: &[DerivedEntry], count: usize) -> Vec<TopPrediction> {
    ranked
        .iter()
        .take(count)
        .map(|entry| TopPrediction {
            score: entry.label.clone(),
            probability: entry.probability.round(),
            final_score: round_to(entry.final_score, 2),
        })
        .collect()
}

/// Runners-up within the `ranks` window whose final score reaches `min_score`. The quoted
/// probability is the rounded final score, capped at `probability_cap`.
pub fn alternatives(
    ranked: &[DerivedEntry],
    ranks: Range<usize>,
    min_score: f64,
    probability_cap: u8,
) -> Vec<AlternativeScore> {
    let end = usize::min(ranks.end, ranked.len());
    let start = usize::min(ranks.start, end);
    ranked[start..end]
        .iter()
        .filter(|entry| entry.final_score >= min_score)
        .map(|entry| AlternativeScore {
            score: entry.label.clone(),
            probability: f64::min(probability_cap as f64, entry.final_score.round()) as u8,
            coefficient: entry.coefficient,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::testing::derived;

    use super::*;

    fn scored(final_scores: &[f64]) -> Vec<DerivedEntry> {
        let labels = ["0-0", "1-0", "0-1", "1-1", "2-0", "0-2", "2-1", "1-2"];
        let quotes = labels[..final_scores.len()]
            .iter()
            .map(|&label| (label, 5.0, 20.0))
            .collect::<Vec<_>>();
        let mut entries = derived(&quotes);
        for (entry, &final_score) in entries.iter_mut().zip(final_scores) {
            entry.final_score = final_score;
        }
        entries
    }

    fn labels(entries: &[DerivedEntry]) -> Vec<&str> {
        entries.iter().map(|entry| entry.label.as_str()).collect()
    }

    #[test]
    fn rank_descending() {
        let mut entries = scored(&[10.0, 30.0, 20.0]);
        rank(&mut entries);
        assert_eq!(vec!["1-0", "0-1", "0-0"], labels(&entries));
    }

    #[test]
    fn rank_stable_on_ties() {
        let mut entries = scored(&[10.0, 30.0, 10.0, 30.0]);
        rank(&mut entries);
        assert_eq!(vec!["1-0", "1-1", "0-0", "0-1"], labels(&entries));
    }

    #[test]
    fn top_predictions_truncated_and_rounded() {
        let mut entries = scored(&[90.126, 85.0, 80.0, 70.0, 60.0, 50.0, 40.0, 30.0]);
        entries[0].probability = 20.5;
        let top = top_predictions(&entries, 6);
        assert_eq!(6, top.len());
        assert_eq!("0-0", top[0].score);
        assert_eq!(21.0, top[0].probability);
        assert_eq!(90.13, top[0].final_score);
        assert_eq!("0-2", top[5].score);
    }

    #[test]
    fn alternatives_from_runners_up() {
        let entries = scored(&[120.0, 99.4, 79.9, 85.0, 95.0]);
        let alternatives = alternatives(&entries, 1..4, 80.0, 92);
        assert_eq!(
            vec![
                AlternativeScore {
                    score: "1-0".into(),
                    probability: 92,
                    coefficient: 5.0,
                },
                AlternativeScore {
                    score: "1-1".into(),
                    probability: 85,
                    coefficient: 5.0,
                },
            ],
            alternatives
        );
    }

    #[test]
    fn alternatives_short_list() {
        assert!(alternatives(&scored(&[100.0]), 1..4, 80.0, 92).is_empty());
        assert_eq!(1, alternatives(&scored(&[100.0, 81.0]), 1..4, 80.0, 92).len());
        assert!(alternatives(&[], 1..4, 80.0, 92).is_empty());
    }
}
