//! Assembly of the prediction pipeline: screening, feature derivation, factor analysis, scoring,
//! ranking, confidence estimation and risk classification.

use std::ops::Range;

use anyhow::bail;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};
use tracing::debug;

use crate::analysis::market::MarketSummary;
use crate::analysis;
use crate::domain::error::ConfigError;
use crate::domain::normalise::normalise;
use crate::domain::{OddsEntry, RawOdds, RiskLevel};
use crate::features::{self, DerivedEntry};
use crate::rank::{AlternativeScore, TopPrediction};
use crate::{combine, confidence, rank, risk_level};

#[cfg(test)]
mod tests;

/// Predicted score reported when no quotation survives screening.
pub const FALLBACK_SCORE: &str = "1-1";

/// Which of the analysers most shaped the prediction.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Display, EnumIter, Serialize, Deserialize)]
pub enum AlgorithmLabel {
    MarketAnalysis,
    Clustering,
    PatternRecognition,
    MultiAlgorithm,
    InsufficientData,
}
impl AlgorithmLabel {
    /// Cluster multiplier from which clustering is credited.
    const CLUSTER_THRESHOLD: f64 = 1.3;

    /// Pattern multiplier from which pattern recognition is credited.
    const PATTERN_THRESHOLD: f64 = 1.2;

    fn select(primary: &DerivedEntry, market: &MarketSummary) -> Self {
        if market.is_deep() {
            AlgorithmLabel::MarketAnalysis
        } else if primary.cluster_score >= Self::CLUSTER_THRESHOLD {
            AlgorithmLabel::Clustering
        } else if primary.pattern_score >= Self::PATTERN_THRESHOLD {
            AlgorithmLabel::PatternRecognition
        } else {
            AlgorithmLabel::MultiAlgorithm
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub predicted_score: String,
    pub confidence: u8,
    pub top_predictions: Vec<TopPrediction>,
    pub alternative_scores: Vec<AlternativeScore>,
    pub risk_level: RiskLevel,
    #[serde(rename = "algorithmUsed")]
    pub algorithm_label: AlgorithmLabel,
    pub market_analysis: MarketSummary,
}
impl Prediction {
    /// The sentinel returned when there is no valid quotation to work with.
    pub fn fallback() -> Self {
        Self {
            predicted_score: FALLBACK_SCORE.into(),
            confidence: confidence::FALLBACK_CONFIDENCE,
            top_predictions: vec![],
            alternative_scores: vec![],
            risk_level: RiskLevel::VeryHigh,
            algorithm_label: AlgorithmLabel::InsufficientData,
            market_analysis: MarketSummary::empty(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.algorithm_label == AlgorithmLabel::InsufficientData
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Number of leading entries reported in [`Prediction::top_predictions`].
    pub top_predictions: usize,

    /// Ranks (0-based) from which alternatives are drawn.
    pub alternatives: Range<usize>,

    /// Final score an entry must reach to be offered as an alternative.
    pub alternative_min_score: f64,

    /// Ceiling on the probability quoted for an alternative.
    pub alternative_probability_cap: u8,
}
impl Config {
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.top_predictions == 0 {
            bail!("at least one top prediction must be reported");
        }
        if self.alternatives.start == 0 {
            bail!("alternatives cannot include the primary prediction");
        }
        if self.alternatives.is_empty() {
            bail!("alternatives range {:?} is empty", self.alternatives);
        }
        if !self.alternative_min_score.is_finite() {
            bail!("alternative minimum score must be finite");
        }
        if self.alternative_probability_cap > 100 {
            bail!(
                "alternative probability cap ({}) cannot exceed 100",
                self.alternative_probability_cap
            );
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            top_predictions: 6,
            alternatives: 1..4,
            alternative_min_score: 80.0,
            alternative_probability_cap: 92,
        }
    }
}

/// Stateless prediction engine. Every call works only off its own input.
#[derive(Debug, Clone, Default)]
pub struct Predictor {
    config: Config,
}
impl Predictor {
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Screens the raw quotations and predicts from the valid ones.
    pub fn predict(&self, raw: &[RawOdds]) -> Prediction {
        let entries = normalise(raw);
        debug!("{} of {} quotations valid", entries.len(), raw.len());
        self.predict_entries(&entries)
    }

    pub fn predict_entries(&self, entries: &[OddsEntry]) -> Prediction {
        let mut derived = features::derive(entries);
        if derived.is_empty() {
            debug!("no valid quotations, falling back to {FALLBACK_SCORE}");
            return Prediction::fallback();
        }

        // factors are set-level; rescore after dropping an overflowing entry
        let factors = loop {
            let factors = analysis::analyse(&derived);
            combine::combine(&mut derived, &factors);
            if !combine::discard_non_finite(&mut derived) {
                break factors;
            }
            if derived.is_empty() {
                debug!("no scorable quotations, falling back to {FALLBACK_SCORE}");
                return Prediction::fallback();
            }
        };
        rank::rank(&mut derived);

        let primary = &derived[0];
        let confidence = confidence::estimate(primary, &derived, derived.len(), &factors.market);
        let risk_level = risk_level::classify(confidence, primary.coefficient);
        debug!(
            "primary {} with final score {:.2}, confidence {confidence}, risk {risk_level}",
            primary.label, primary.final_score
        );

        Prediction {
            predicted_score: primary.label.clone(),
            confidence,
            top_predictions: rank::top_predictions(&derived, self.config.top_predictions),
            alternative_scores: rank::alternatives(
                &derived,
                self.config.alternatives.clone(),
                self.config.alternative_min_score,
                self.config.alternative_probability_cap,
            ),
            risk_level,
            algorithm_label: AlgorithmLabel::select(primary, &factors.market),
            market_analysis: factors.market,
        }
    }
}

impl TryFrom<Config> for Predictor {
    type Error = ConfigError;

    fn try_from(config: Config) -> Result<Self, Self::Error> {
        config.validate()?;
        Ok(Self { config })
    }
}

/// Predicts with the default configuration.
pub fn predict(raw: &[RawOdds]) -> Prediction {
    Predictor::default().predict(raw)
}
