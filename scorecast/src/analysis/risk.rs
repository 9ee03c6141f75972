use crate::features::DerivedEntry;

/// Coefficient ceilings and their multipliers, checked in order. Anything above the last ceiling
/// takes [`LONGSHOT`].
pub const RISK_BUCKETS: [(f64, f64); 3] = [(3.0, 1.4), (6.0, 1.2), (10.0, 1.0)];
pub const LONGSHOT: f64 = 0.7;

pub fn risk_score(coefficient: f64) -> f64 {
    RISK_BUCKETS
        .iter()
        .find(|(ceiling, _)| coefficient <= *ceiling)
        .map(|&(_, multiplier)| multiplier)
        .unwrap_or(LONGSHOT)
}

pub fn risk_scores(entries: &[DerivedEntry]) -> Vec<f64> {
    entries.iter().map(|entry| risk_score(entry.coefficient)).collect()
}
