//! At-a-glance overview of a market: per-score insights, the leading scores by probability,
//! high-success alternatives and market-wide metrics.

use std::collections::BTreeMap;

use serde::Serialize;
use strum_macros::{Display, EnumIter};

use crate::domain::{OddsEntry, RiskLevel};
use crate::stats::{round_to, SliceExt};

pub const TOP_SCORES: usize = 20;
pub const HIGH_SUCCESS_ALTERNATIVES: usize = 3;

/// Risk bands by coefficient ceiling; anything beyond the last is [`RiskLevel::High`].
pub const RISK_BANDS: [(f64, RiskLevel); 3] = [
    (3.0, RiskLevel::VeryLow),
    (5.0, RiskLevel::Low),
    (8.0, RiskLevel::Moderate),
];

/// A value (probability over coefficient) at or above this marks a value opportunity.
pub const HIGH_VALUE: f64 = 2.0;

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Display, EnumIter, Serialize)]
pub enum SuccessPotential {
    Excellent,
    VeryGood,
    Good,
    Average,
}
impl SuccessPotential {
    pub fn of(probability: f64) -> Self {
        if probability >= 20.0 {
            SuccessPotential::Excellent
        } else if probability >= 15.0 {
            SuccessPotential::VeryGood
        } else if probability >= 10.0 {
            SuccessPotential::Good
        } else {
            SuccessPotential::Average
        }
    }
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Display, EnumIter, Serialize)]
pub enum MarketMood {
    Bullish,
    Neutral,
    Bearish,
}
impl MarketMood {
    pub fn of(mean_probability: f64) -> Self {
        if mean_probability >= 12.0 {
            MarketMood::Bullish
        } else if mean_probability >= 8.0 {
            MarketMood::Neutral
        } else {
            MarketMood::Bearish
        }
    }
}

pub fn risk_band(coefficient: f64) -> RiskLevel {
    RISK_BANDS
        .iter()
        .find(|(ceiling, _)| coefficient <= *ceiling)
        .map_or(RiskLevel::High, |&(_, level)| level)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreInsight {
    pub score: String,
    pub coefficient: f64,
    pub probability: f64,
    pub implied_probability: f64,
    pub value: f64,
    pub risk: RiskLevel,
    pub success_potential: SuccessPotential,
}
impl From<&OddsEntry> for ScoreInsight {
    fn from(entry: &OddsEntry) -> Self {
        Self {
            score: entry.label.clone(),
            coefficient: entry.coefficient,
            probability: entry.probability,
            implied_probability: entry.implied_probability(),
            value: entry.probability / entry.coefficient,
            risk: risk_band(entry.coefficient),
            success_potential: SuccessPotential::of(entry.probability),
        }
    }
}
impl ScoreInsight {
    fn is_high_success(&self) -> bool {
        self.probability >= 15.0 && self.coefficient <= 6.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketMetrics {
    pub total_analyzed: usize,
    pub avg_probability: f64,
    pub avg_coefficient: f64,
    pub market_mood: MarketMood,
    pub high_value_scores: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OddsOverview {
    /// Insights in the order of the quotations.
    pub insights: Vec<ScoreInsight>,
    pub top_scores: Vec<ScoreInsight>,
    pub high_success_alternatives: Vec<ScoreInsight>,
    pub risk_distribution: BTreeMap<RiskLevel, usize>,
    pub success_distribution: BTreeMap<SuccessPotential, usize>,
    pub metrics: MarketMetrics,
}

/// Overviews the valid `entries`; `None` when there are none.
pub fn overview(entries: &[OddsEntry]) -> Option<OddsOverview> {
    if entries.is_empty() {
        return None;
    }
    let insights = entries.iter().map(ScoreInsight::from).collect::<Vec<_>>();

    let mut top_scores = insights.clone();
    top_scores.sort_by(|a, b| b.probability.total_cmp(&a.probability));
    top_scores.truncate(TOP_SCORES);

    let mut high_success_alternatives = insights
        .iter()
        .filter(|insight| insight.is_high_success())
        .cloned()
        .collect::<Vec<_>>();
    high_success_alternatives.sort_by(|a, b| b.value.total_cmp(&a.value));
    high_success_alternatives.truncate(HIGH_SUCCESS_ALTERNATIVES);

    let mut risk_distribution = BTreeMap::new();
    let mut success_distribution = BTreeMap::new();
    for insight in &insights {
        *risk_distribution.entry(insight.risk).or_default() += 1;
        *success_distribution.entry(insight.success_potential).or_default() += 1;
    }

    let probabilities = insights.iter().map(|insight| insight.probability).collect::<Vec<_>>();
    let coefficients = insights.iter().map(|insight| insight.coefficient).collect::<Vec<_>>();
    let metrics = MarketMetrics {
        total_analyzed: insights.len(),
        avg_probability: round_to(probabilities.mean(), 2),
        avg_coefficient: round_to(coefficients.mean(), 2),
        market_mood: MarketMood::of(probabilities.mean()),
        high_value_scores: insights.iter().filter(|insight| insight.value >= HIGH_VALUE).count(),
    };

    Some(OddsOverview {
        insights,
        top_scores,
        high_success_alternatives,
        risk_distribution,
        success_distribution,
        metrics,
    })
}
