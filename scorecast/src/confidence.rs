//! Bounded confidence in the headline prediction.

use std::ops::RangeInclusive;

use crate::analysis::market::MarketSummary;
use crate::features::DerivedEntry;

/// The most a final score can contribute before bonuses.
pub const BASE_CAP: f64 = 85.0;

/// Confidence is never reported outside of this range, however strong or weak the evidence.
pub const CONFIDENCE_BOUNDS: RangeInclusive<u8> = 45..=95;

/// Confidence reported when there is nothing to base a prediction on.
pub const FALLBACK_CONFIDENCE: u8 = 45;

/// Bonus tables as (threshold, bonus) pairs, checked in order, first match wins.
pub const DEPTH_BONUSES: [(usize, f64); 4] = [(20, 8.0), (15, 6.0), (10, 4.0), (5, 2.0)];
pub const LEADER_GAP_BONUSES: [(f64, f64); 3] = [(15.0, 6.0), (10.0, 4.0), (5.0, 2.0)];
pub const COEFFICIENT_BONUSES: [(f64, f64); 2] = [(3.0, 5.0), (5.0, 3.0)];
pub const DEEP_MARKET_BONUS: f64 = 3.0;

pub fn depth_bonus(depth: usize) -> f64 {
    DEPTH_BONUSES
        .iter()
        .find(|(min_depth, _)| depth >= *min_depth)
        .map_or(0.0, |&(_, bonus)| bonus)
}

/// Rewards a clear leader: the gap between the primary and the runner-up final scores.
pub fn leader_gap_bonus(ranked: &[DerivedEntry]) -> f64 {
    match ranked {
        [primary, runner_up, ..] => {
            let gap = primary.final_score - runner_up.final_score;
            LEADER_GAP_BONUSES
                .iter()
                .find(|(min_gap, _)| gap >= *min_gap)
                .map_or(0.0, |&(_, bonus)| bonus)
        }
        _ => 0.0,
    }
}

pub fn coefficient_bonus(coefficient: f64) -> f64 {
    COEFFICIENT_BONUSES
        .iter()
        .find(|(max_coefficient, _)| coefficient <= *max_coefficient)
        .map_or(0.0, |&(_, bonus)| bonus)
}

pub fn market_bonus(market: &MarketSummary) -> f64 {
    if market.is_deep() {
        DEEP_MARKET_BONUS
    } else {
        0.0
    }
}

/// Estimates the confidence in `primary`, the head of the `ranked` list, given the number of valid
/// quotations (`depth`) and the market summary.
pub fn estimate(primary: &DerivedEntry, ranked: &[DerivedEntry], depth: usize, market: &MarketSummary) -> u8 {
    let confidence = f64::min(primary.final_score, BASE_CAP)
        + depth_bonus(depth)
        + leader_gap_bonus(ranked)
        + coefficient_bonus(primary.coefficient)
        + market_bonus(market);
    clamp(confidence)
}

fn clamp(confidence: f64) -> u8 {
    let (min, max) = (*CONFIDENCE_BOUNDS.start() as f64, *CONFIDENCE_BOUNDS.end() as f64);
    confidence.round().clamp(min, max) as u8
}

#[cfg(test)]
mod tests {
    use crate::analysis::market::{market_strength, MarketSummary};
    use crate::testing::derived;

    use super::*;

    fn ranked(final_scores: &[f64], coefficient: f64) -> Vec<DerivedEntry> {
        let labels = ["0-0", "1-0", "0-1", "1-1"];
        let quotes = labels[..final_scores.len()]
            .iter()
            .map(|&label| (label, coefficient, 20.0))
            .collect::<Vec<_>>();
        let mut entries = derived(&quotes);
        for (entry, &final_score) in entries.iter_mut().zip(final_scores) {
            entry.final_score = final_score;
        }
        entries
    }

    fn market(depth: usize) -> MarketSummary {
        MarketSummary {
            market_strength: market_strength(depth),
            total_scores_analyzed: depth,
            ..MarketSummary::empty()
        }
    }

    #[test]
    fn depth_bonuses() {
        assert_eq!(0.0, depth_bonus(4));
        assert_eq!(2.0, depth_bonus(5));
        assert_eq!(4.0, depth_bonus(10));
        assert_eq!(6.0, depth_bonus(19));
        assert_eq!(8.0, depth_bonus(20));
        assert_eq!(8.0, depth_bonus(99));
    }

    #[test]
    fn leader_gap_bonuses() {
        assert_eq!(0.0, leader_gap_bonus(&ranked(&[50.0], 7.0)));
        assert_eq!(0.0, leader_gap_bonus(&ranked(&[50.0, 45.1], 7.0)));
        assert_eq!(2.0, leader_gap_bonus(&ranked(&[50.0, 45.0], 7.0)));
        assert_eq!(4.0, leader_gap_bonus(&ranked(&[50.0, 40.0], 7.0)));
        assert_eq!(6.0, leader_gap_bonus(&ranked(&[50.0, 35.0, 34.0], 7.0)));
    }

    #[test]
    fn coefficient_bonuses() {
        assert_eq!(5.0, coefficient_bonus(3.0));
        assert_eq!(3.0, coefficient_bonus(3.5));
        assert_eq!(3.0, coefficient_bonus(5.0));
        assert_eq!(0.0, coefficient_bonus(5.01));
    }

    #[test]
    fn market_bonuses() {
        assert_eq!(0.0, market_bonus(&market(14)));
        assert_eq!(3.0, market_bonus(&market(15)));
    }

    #[test]
    fn estimate_with_all_bonuses() {
        let entries = ranked(&[70.0, 50.0], 2.5);
        // 70 + 8 + 6 + 5 + 3
        assert_eq!(92, estimate(&entries[0], &entries, 25, &market(25)));
    }

    #[test]
    fn estimate_caps_base() {
        let entries = ranked(&[140.0, 138.0], 7.0);
        assert_eq!(85, estimate(&entries[0], &entries, 3, &market(3)));
    }

    #[test]
    fn estimate_clamped_to_ceiling() {
        let entries = ranked(&[200.0, 100.0], 1.5);
        assert_eq!(95, estimate(&entries[0], &entries, 30, &market(30)));
    }

    #[test]
    fn estimate_clamped_to_floor() {
        let entries = ranked(&[12.0, 11.0], 40.0);
        assert_eq!(45, estimate(&entries[0], &entries, 2, &market(2)));
    }

    #[test]
    fn estimate_rounds() {
        let entries = ranked(&[60.5, 60.0], 9.0);
        assert_eq!(61, estimate(&entries[0], &entries, 1, &market(1)));
    }
}
