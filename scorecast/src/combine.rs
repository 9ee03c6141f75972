//! Weighted blend of the derived features and factor multipliers into a single ranking score.

use tracing::trace;

use crate::analysis::Factors;
use crate::features::DerivedEntry;

pub const PROBABILITY_WEIGHT: f64 = 0.30;
pub const VALUE_WEIGHT: f64 = 0.20;
pub const CLUSTER_WEIGHT: f64 = 0.20;
pub const PATTERN_WEIGHT: f64 = 0.15;
pub const RISK_WEIGHT: f64 = 0.15;

pub const VALUE_SCALE: f64 = 15.0;
pub const CLUSTER_SCALE: f64 = 20.0;
pub const PATTERN_SCALE: f64 = 15.0;
pub const RISK_SCALE: f64 = 10.0;

/// Computes the final score from an entry's features and factors, floored at zero.
pub fn final_score(entry: &DerivedEntry, market_strength: f64) -> f64 {
    let blended = entry.probability * PROBABILITY_WEIGHT
        + entry.value_score * VALUE_SCALE * VALUE_WEIGHT
        + entry.cluster_score * CLUSTER_SCALE * CLUSTER_WEIGHT
        + entry.pattern_score * PATTERN_SCALE * PATTERN_WEIGHT
        + entry.risk_score * RISK_SCALE * RISK_WEIGHT;
    f64::max(0.0, blended * market_strength)
}

/// Attaches the factor multipliers to their entries and scores each one.
pub fn combine(entries: &mut [DerivedEntry], factors: &Factors) {
    debug_assert_eq!(
        entries.len(),
        factors.cluster.len(),
        "number of cluster scores {} does not match number of entries {}",
        factors.cluster.len(),
        entries.len()
    );
    for (index, entry) in entries.iter_mut().enumerate() {
        entry.cluster_score = factors.cluster[index];
        entry.pattern_score = factors.pattern[index];
        entry.risk_score = factors.risk[index];
        entry.final_score = final_score(entry, factors.market.market_strength);
    }
}

/// Drops entries whose final score overflowed, returning whether any were dropped.
pub fn discard_non_finite(entries: &mut Vec<DerivedEntry>) -> bool {
    let before = entries.len();
    entries.retain(|entry| {
        let finite = entry.final_score.is_finite();
        if !finite {
            trace!("discarding {} with non-finite final score", entry.label);
        }
        finite
    });
    entries.len() != before
}
