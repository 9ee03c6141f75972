//! The four factor analysers. Each reads the full set of derived entries and none mutates it, so
//! they can be evaluated in any order.

use crate::analysis::market::MarketSummary;
use crate::features::DerivedEntry;

pub mod clustering;
pub mod market;
pub mod pattern;
pub mod risk;

/// Per-entry multipliers (aligned with the analysed entries) and the set-level market summary.
#[derive(Debug, Clone, PartialEq)]
pub struct Factors {
    pub cluster: Vec<f64>,
    pub pattern: Vec<f64>,
    pub risk: Vec<f64>,
    pub market: MarketSummary,
}

pub fn analyse(entries: &[DerivedEntry]) -> Factors {
    Factors {
        cluster: clustering::cluster_scores(entries),
        pattern: pattern::pattern_scores(entries),
        risk: risk::risk_scores(entries),
        market: MarketSummary::analyse(entries),
    }
}
