//! Per-quotation features derived ahead of the factor analysis.

use serde::Serialize;
use tracing::trace;

use crate::domain::{OddsEntry, Score};

/// Coefficient at which the risk-adjusted probability reaches zero.
pub const RISK_ADJUSTMENT_HORIZON: f64 = 20.0;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedEntry {
    #[serde(rename = "score")]
    pub label: String,
    #[serde(skip)]
    pub score: Score,
    pub coefficient: f64,
    pub probability: f64,
    pub implied_probability: f64,
    pub value_score: f64,
    pub market_sentiment: f64,
    pub risk_adjusted: f64,
    pub cluster_score: f64,
    pub pattern_score: f64,
    pub risk_score: f64,
    pub final_score: f64,
}
impl DerivedEntry {
    /// Derives the features of a single entry. The factor scores start out neutral and the final
    /// score at zero, until the analysers and the combiner have had their turn.
    pub fn derive(entry: &OddsEntry) -> Self {
        let implied_probability = entry.implied_probability();
        Self {
            label: entry.label.clone(),
            score: entry.score.clone(),
            coefficient: entry.coefficient,
            probability: entry.probability,
            implied_probability,
            value_score: entry.probability / entry.coefficient,
            market_sentiment: entry.probability - implied_probability,
            risk_adjusted: entry.probability * (1.0 - entry.coefficient / RISK_ADJUSTMENT_HORIZON),
            cluster_score: 1.0,
            pattern_score: 1.0,
            risk_score: 1.0,
            final_score: 0.0,
        }
    }

    /// Positive coefficient, non-negative probability and finite features. Entries built by hand
    /// rather than screened are held to the same bar.
    fn is_usable(&self) -> bool {
        let features = [
            self.implied_probability,
            self.value_score,
            self.market_sentiment,
            self.risk_adjusted,
        ];
        self.coefficient > 0.0 && self.probability >= 0.0 && features.iter().all(|feature| feature.is_finite())
    }
}

/// Derives features for every entry, discarding any entry that cannot be scored.
pub fn derive(entries: &[OddsEntry]) -> Vec<DerivedEntry> {
    entries
        .iter()
        .map(DerivedEntry::derive)
        .filter(|derived| {
            let usable = derived.is_usable();
            if !usable {
                trace!("discarding unusable {}", derived.label);
            }
            usable
        })
        .collect()
}
