use serde::{Deserialize, Serialize};

use crate::domain::Sentiment;
use crate::features::DerivedEntry;
use crate::stats::{round_to, SliceExt};

pub const SHALLOW_MARKET_STRENGTH: f64 = 1.1;
pub const MODERATE_MARKET_STRENGTH: f64 = 1.2;
pub const DEEP_MARKET_STRENGTH: f64 = 1.3;

/// Aggregate market sentiment below which the market is deemed negative.
pub const NEGATIVE_SENTIMENT_THRESHOLD: f64 = -10.0;

/// Set-level view of the quotations, computed once and shared read-only by the combiner and the
/// confidence estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSummary {
    pub total_scores_analyzed: usize,
    pub overall_sentiment: Sentiment,
    pub avg_coefficient: f64,
    pub confidence_range: f64,
    pub market_strength: f64,
}
impl MarketSummary {
    pub fn analyse(entries: &[DerivedEntry]) -> Self {
        if entries.is_empty() {
            return Self::empty();
        }
        let total_sentiment = entries.iter().map(|entry| entry.market_sentiment).sum();
        let coefficients = entries.iter().map(|entry| entry.coefficient).collect::<Vec<_>>();
        let probabilities = entries.iter().map(|entry| entry.probability).collect::<Vec<_>>();
        Self {
            total_scores_analyzed: entries.len(),
            overall_sentiment: sentiment(total_sentiment),
            avg_coefficient: round_to(coefficients.mean(), 2),
            confidence_range: round_to(probabilities.highest() - probabilities.lowest(), 2),
            market_strength: market_strength(entries.len()),
        }
    }

    /// The summary of a market with no usable quotations.
    pub fn empty() -> Self {
        Self {
            total_scores_analyzed: 0,
            overall_sentiment: Sentiment::Neutral,
            avg_coefficient: 0.0,
            confidence_range: 0.0,
            market_strength: SHALLOW_MARKET_STRENGTH,
        }
    }

    pub fn is_deep(&self) -> bool {
        self.market_strength >= DEEP_MARKET_STRENGTH
    }
}

pub fn sentiment(total_sentiment: f64) -> Sentiment {
    if total_sentiment > 0.0 {
        Sentiment::Positive
    } else if total_sentiment < NEGATIVE_SENTIMENT_THRESHOLD {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

/// Trust multiplier that grows with the number of valid quotations.
pub fn market_strength(depth: usize) -> f64 {
    if depth >= 15 {
        DEEP_MARKET_STRENGTH
    } else if depth >= 10 {
        MODERATE_MARKET_STRENGTH
    } else {
        SHALLOW_MARKET_STRENGTH
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::*;

    use crate::testing::{derived, CLEAR_LEADER};

    use super::*;

    #[test]
    fn sentiment_thresholds() {
        assert_eq!(Sentiment::Positive, sentiment(0.1));
        assert_eq!(Sentiment::Neutral, sentiment(0.0));
        assert_eq!(Sentiment::Neutral, sentiment(-10.0));
        assert_eq!(Sentiment::Negative, sentiment(-10.1));
    }

    #[test]
    fn strength_by_depth() {
        assert_eq!(SHALLOW_MARKET_STRENGTH, market_strength(0));
        assert_eq!(SHALLOW_MARKET_STRENGTH, market_strength(9));
        assert_eq!(MODERATE_MARKET_STRENGTH, market_strength(10));
        assert_eq!(MODERATE_MARKET_STRENGTH, market_strength(14));
        assert_eq!(DEEP_MARKET_STRENGTH, market_strength(15));
        assert_eq!(DEEP_MARKET_STRENGTH, market_strength(40));
    }

    #[test]
    fn analyse_clear_leader() {
        let summary = MarketSummary::analyse(&derived(&CLEAR_LEADER));
        // sentiments: 30 − 33.33, 20 − 25, 10 − 12.5
        assert_eq!(Sentiment::Negative, summary.overall_sentiment);
        assert_eq!(3, summary.total_scores_analyzed);
        assert_f64_near!(5.0, summary.avg_coefficient);
        assert_f64_near!(20.0, summary.confidence_range);
        assert_eq!(SHALLOW_MARKET_STRENGTH, summary.market_strength);
        assert!(!summary.is_deep());
    }

    #[test]
    fn analyse_empty() {
        assert_eq!(MarketSummary::empty(), MarketSummary::analyse(&[]));
    }
}
