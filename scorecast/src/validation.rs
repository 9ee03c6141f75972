//! Plausibility check of an existing prediction against the quotations it was made from. Four
//! metrics, each scored out of 100, are blended with fixed weights into a single validation score.

use std::collections::BTreeMap;
use std::str::FromStr;

use anyhow::bail;
use ordinalizer::Ordinal;
use serde::{Deserialize, Serialize};
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{Display, EnumCount, EnumIter};
use tracing::debug;

use crate::domain::error::ConfigError;
use crate::domain::normalise::normalise;
use crate::domain::{OddsEntry, RawOdds, Score};
use crate::predict::Prediction;
use crate::stats::{round_percent, SliceExt};


#[derive(
    Clone,
    Copy,
    Debug,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Display,
    EnumCount,
    EnumIter,
    Ordinal,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    OddsQuality,
    PredictionRealism,
    ConfidenceCalibration,
    MarketConsistency,
}

/// Metric weights, indexed by [`Metric`] ordinal.
pub type MetricWeights = [f64; Metric::COUNT];

pub const DEFAULT_WEIGHTS: MetricWeights = [0.25, 0.25, 0.25, 0.25];

pub const DEFAULT_THRESHOLD: u8 = 70;
pub const STRICT_THRESHOLD: u8 = 80;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Valid-entry counts and the odds-quality points they earn.
pub const QUANTITY_POINTS: [(usize, u8); 5] = [(25, 40), (20, 35), (15, 28), (10, 20), (5, 10)];

/// Coefficient ranges (highest less lowest) and the odds-quality points they earn.
pub const RANGE_POINTS: [(f64, u8); 4] = [(20.0, 30), (15.0, 25), (10.0, 20), (5.0, 10)];

/// Allowed deviations of the probability mass from 100 and the odds-quality points they earn.
pub const MASS_POINTS: [(f64, u8); 3] = [(5.0, 30), (20.0, 20), (35.0, 10)];

/// Realism assigned to a predicted score that is not among the quotations.
pub const ABSENT_REALISM: u8 = 30;
const REALISM_BASE: u8 = 50;
const PLAUSIBLE_COEFFICIENTS: (f64, f64) = (1.5, 15.0);
const PLAUSIBLE_COEFFICIENT_POINTS: u8 = 30;
const TOLERABLE_COEFFICIENT: f64 = 25.0;
const TOLERABLE_COEFFICIENT_POINTS: u8 = 15;
const PROBABILITY_POINTS: [(f64, u8); 3] = [(15.0, 20), (10.0, 15), (5.0, 10)];

const UNCALIBRATED: u8 = 40;
const EXPECTED_CONFIDENCE_BASE: f64 = 50.0;
const EXPECTED_DEPTH_BONUSES: [(usize, f64); 3] = [(20, 25.0), (15, 20.0), (10, 15.0)];
const EXPECTED_COEFFICIENT_BONUSES: [(f64, f64); 2] = [(5.0, 15.0), (8.0, 10.0)];
const DISPERSION_THRESHOLD: f64 = 5.0;
const DISPERSION_BONUS: f64 = 5.0;
const CALIBRATION_BANDS: [(f64, u8); 3] = [(10.0, 100), (20.0, 80), (30.0, 60)];

const MIN_CONSISTENCY_RECORDS: usize = 3;
const TOO_FEW_RECORDS: u8 = 50;
const TOO_FEW_PRICED: u8 = 40;
const CONSISTENCY_BANDS: [(f64, f64); 2] = [(15.0, 100.0), (30.0, 60.0)];
const INCONSISTENT: f64 = 20.0;
const CONSISTENCY_DEPTH: usize = 15;
const CONSISTENCY_DEPTH_BONUS: f64 = 5.0;

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Display, EnumIter, Serialize, Deserialize)]
pub enum Recommendation {
    Excellent,
    Good,
    Fair,
    Acceptable,
    Risky,
}
impl Recommendation {
    const LADDER: [(u8, Recommendation); 4] = [
        (90, Recommendation::Excellent),
        (80, Recommendation::Good),
        (70, Recommendation::Fair),
        (60, Recommendation::Acceptable),
    ];

    pub fn for_score(validation_score: u8) -> Self {
        Self::LADDER
            .iter()
            .find(|(min_score, _)| validation_score >= *min_score)
            .map_or(Recommendation::Risky, |&(_, recommendation)| recommendation)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Recommendation::Excellent => "highly reliable prediction, strongly supported by the market",
            Recommendation::Good => "reliable prediction with solid market support",
            Recommendation::Fair => "reasonable prediction, consider the stake carefully",
            Recommendation::Acceptable => "weakly supported prediction, proceed with caution",
            Recommendation::Risky => "poorly supported prediction, not recommended",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub validation_score: u8,
    pub metrics: BTreeMap<Metric, u8>,
    pub recommendation: Recommendation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Validation score from which a prediction is deemed valid.
    pub threshold: u8,
    pub weights: MetricWeights,
}
impl Config {
    /// The stricter variant, with a validity threshold of 80.
    pub fn strict() -> Self {
        Self {
            threshold: STRICT_THRESHOLD,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.threshold > 100 {
            bail!("threshold ({}) cannot exceed 100", self.threshold);
        }
        for metric in Metric::iter() {
            let weight = self.weights[metric.ordinal()];
            if !(0.0..=1.0).contains(&weight) {
                bail!("weight of {metric} ({weight}) must lie in [0, 1]");
            }
        }
        let sum = self.weights.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            bail!("weights must add up to 1, got {sum}");
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            weights: DEFAULT_WEIGHTS,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: Config,
}
impl Validator {
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Validates a `prediction` against the quotations it was made from.
    pub fn validate(&self, prediction: &Prediction, raw: &[RawOdds]) -> ValidationResult {
        self.assess(&prediction.predicted_score, prediction.confidence, raw)
    }

    /// Validates a bare predicted score and its confidence against a set of quotations.
    pub fn assess(&self, predicted_score: &str, confidence: u8, raw: &[RawOdds]) -> ValidationResult {
        let entries = normalise(raw);
        let metrics = BTreeMap::from([
            (Metric::OddsQuality, odds_quality(&entries)),
            (Metric::PredictionRealism, prediction_realism(predicted_score, &entries)),
            (Metric::ConfidenceCalibration, confidence_calibration(confidence, &entries)),
            (Metric::MarketConsistency, market_consistency(raw.len(), &entries)),
        ]);
        let weighted = metrics
            .iter()
            .map(|(metric, &score)| self.config.weights[metric.ordinal()] * score as f64)
            .sum::<f64>();
        let validation_score = round_percent(weighted);
        let recommendation = Recommendation::for_score(validation_score);
        debug!("validation of {predicted_score}: {metrics:?} -> {validation_score} ({recommendation})");

        ValidationResult {
            is_valid: validation_score >= self.config.threshold,
            validation_score,
            metrics,
            recommendation,
        }
    }
}

impl TryFrom<Config> for Validator {
    type Error = ConfigError;

    fn try_from(config: Config) -> Result<Self, Self::Error> {
        config.validate()?;
        Ok(Self { config })
    }
}

/// Validates with the default configuration.
pub fn validate(prediction: &Prediction, raw: &[RawOdds]) -> ValidationResult {
    Validator::default().validate(prediction, raw)
}

/// Rewards deep markets, a wide spread of coefficients and a stated probability mass close to 100.
/// Quotations without a stated probability add nothing to the mass.
pub fn odds_quality(entries: &[OddsEntry]) -> u8 {
    if entries.is_empty() {
        return 0;
    }
    let coefficients = entries.iter().map(|entry| entry.coefficient).collect::<Vec<_>>();
    let range = coefficients.highest() - coefficients.lowest();
    let mass = entries.iter().map(OddsEntry::stated_or_zero).sum::<f64>();

    let quantity_points = QUANTITY_POINTS
        .iter()
        .find(|(min_count, _)| entries.len() >= *min_count)
        .map_or(0, |&(_, points)| points);
    let range_points = RANGE_POINTS
        .iter()
        .find(|(min_range, _)| range >= *min_range)
        .map_or(0, |&(_, points)| points);
    let mass_points = MASS_POINTS
        .iter()
        .find(|(deviation, _)| (mass - 100.0).abs() <= *deviation)
        .map_or(0, |&(_, points)| points);
    u8::min(100, quantity_points + range_points + mass_points)
}

/// Judges whether the predicted score is quoted at all, and if so, whether its coefficient and
/// stated probability are believable.
pub fn prediction_realism(predicted_score: &str, entries: &[OddsEntry]) -> u8 {
    let Ok(predicted) = Score::from_str(predicted_score) else {
        return ABSENT_REALISM;
    };
    let Some(entry) = entries.iter().find(|entry| entry.score == predicted) else {
        return ABSENT_REALISM;
    };

    let (low, high) = PLAUSIBLE_COEFFICIENTS;
    let coefficient_points = if (low..=high).contains(&entry.coefficient) {
        PLAUSIBLE_COEFFICIENT_POINTS
    } else if entry.coefficient <= TOLERABLE_COEFFICIENT {
        TOLERABLE_COEFFICIENT_POINTS
    } else {
        0
    };
    let probability = entry.stated_or_zero();
    let probability_points = PROBABILITY_POINTS
        .iter()
        .find(|(min_probability, _)| probability >= *min_probability)
        .map_or(0, |&(_, points)| points);
    u8::min(100, REALISM_BASE + coefficient_points + probability_points)
}

/// The confidence one would expect given the depth of the market and the level and dispersion of
/// its coefficients.
pub fn expected_confidence(entries: &[OddsEntry]) -> f64 {
    let coefficients = entries.iter().map(|entry| entry.coefficient).collect::<Vec<_>>();
    let depth_bonus = EXPECTED_DEPTH_BONUSES
        .iter()
        .find(|(min_depth, _)| entries.len() >= *min_depth)
        .map_or(0.0, |&(_, bonus)| bonus);
    let mean = coefficients.mean();
    let coefficient_bonus = EXPECTED_COEFFICIENT_BONUSES
        .iter()
        .find(|(max_mean, _)| mean <= *max_mean)
        .map_or(0.0, |&(_, bonus)| bonus);
    let dispersion_bonus = if coefficients.stdev() >= DISPERSION_THRESHOLD {
        DISPERSION_BONUS
    } else {
        0.0
    };
    EXPECTED_CONFIDENCE_BASE + depth_bonus + coefficient_bonus + dispersion_bonus
}

/// Scores the stated confidence by its closeness to the expected confidence.
pub fn confidence_calibration(confidence: u8, entries: &[OddsEntry]) -> u8 {
    if entries.is_empty() {
        return UNCALIBRATED;
    }
    let difference = (confidence as f64 - expected_confidence(entries)).abs();
    CALIBRATION_BANDS
        .iter()
        .find(|(max_difference, _)| difference <= *max_difference)
        .map_or(UNCALIBRATED, |&(_, score)| score)
}

/// Agreement between the stated probabilities and those implied by the coefficients. The record
/// count is of the raw quotations, before screening. Only quotations with a positive stated
/// probability are checked.
pub fn market_consistency(records: usize, entries: &[OddsEntry]) -> u8 {
    if records < MIN_CONSISTENCY_RECORDS {
        return TOO_FEW_RECORDS;
    }
    let scores = entries
        .iter()
        .filter_map(|entry| {
            let stated = entry.stated_probability.filter(|&probability| probability > 0.0)?;
            Some((stated, entry.implied_probability()))
        })
        .map(|(stated, implied)| {
            let divergence = (stated - implied).abs();
            CONSISTENCY_BANDS
                .iter()
                .find(|(max_divergence, _)| divergence <= *max_divergence)
                .map_or(INCONSISTENT, |&(_, score)| score)
        })
        .collect::<Vec<_>>();
    if scores.len() < MIN_CONSISTENCY_RECORDS {
        return TOO_FEW_PRICED;
    }
    let depth_bonus = if scores.len() >= CONSISTENCY_DEPTH {
        CONSISTENCY_DEPTH_BONUS
    } else {
        0.0
    };
    round_percent(scores.mean() + depth_bonus)
}
