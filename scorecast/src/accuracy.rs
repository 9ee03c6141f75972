//! Post-hoc accuracy tracking: settling predictions against the results reported by a score
//! feed, and aggregating hit rates across a body of settled predictions.

use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};
use tracing::debug;

use crate::domain::Score;
use crate::predict::{AlgorithmLabel, Prediction};
use crate::stats::round_percent;

/// Confidence from which a prediction counts as high-confidence.
pub const HIGH_CONFIDENCE: u8 = 80;

/// Status of a fixture as reported by the score feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FeedStatus {
    #[serde(rename_all = "camelCase")]
    Finished { final_score: String },

    #[serde(rename_all = "camelCase")]
    Live { current_score: String, minute: u16 },

    Upcoming,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActualResult {
    pub actual_score: String,
    pub correct: bool,
}
impl ActualResult {
    /// Settles `prediction` against the final score. Scores are compared by value where both
    /// parse, so that "02-1" settles a prediction of "2-1".
    pub fn settle(prediction: &Prediction, actual_score: &str) -> Self {
        let correct = match (Score::from_str(&prediction.predicted_score), Score::from_str(actual_score)) {
            (Ok(predicted), Ok(actual)) => predicted == actual,
            _ => prediction.predicted_score.trim() == actual_score.trim(),
        };
        Self {
            actual_score: actual_score.trim().into(),
            correct,
        }
    }
}

/// Outcome of reconciling a tracked prediction with the score feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Reconciliation {
    #[serde(rename_all = "camelCase")]
    Settled { actual_score: String, correct: bool },

    #[serde(rename_all = "camelCase")]
    InPlay { current_score: String, minute: u16 },

    Pending,
}

/// A prediction together with its actual result, once known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedPrediction {
    #[serde(flatten)]
    pub prediction: Prediction,

    #[serde(default)]
    pub actual_result: Option<ActualResult>,
}
impl TrackedPrediction {
    pub fn new(prediction: Prediction) -> Self {
        Self {
            prediction,
            actual_result: None,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.actual_result.is_some()
    }

    /// Attaches the actual result when the fixture has finished; otherwise only reports where the
    /// fixture stands.
    pub fn reconcile(&mut self, status: &FeedStatus) -> Reconciliation {
        match status {
            FeedStatus::Finished { final_score } => {
                let result = ActualResult::settle(&self.prediction, final_score);
                debug!(
                    "settled {} against {}: correct: {}",
                    self.prediction.predicted_score, result.actual_score, result.correct
                );
                let reconciliation = Reconciliation::Settled {
                    actual_score: result.actual_score.clone(),
                    correct: result.correct,
                };
                self.actual_result = Some(result);
                reconciliation
            }
            FeedStatus::Live { current_score, minute } => Reconciliation::InPlay {
                current_score: current_score.clone(),
                minute: *minute,
            },
            FeedStatus::Upcoming => Reconciliation::Pending,
        }
    }

    fn is_correct(&self) -> bool {
        self.actual_result.as_ref().is_some_and(|result| result.correct)
    }
}

/// Hit count over some subset of the settled predictions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub total: usize,
    pub correct: usize,

    /// Rounded percentage; zero when the subset is empty.
    pub accuracy: u8,
}
impl Tally {
    fn of<'a>(settled: impl IntoIterator<Item = &'a TrackedPrediction>) -> Self {
        let (total, correct) = settled
            .into_iter()
            .fold((0, 0), |(total, correct), tracked| {
                (total + 1, correct + usize::from(tracked.is_correct()))
            });
        Self {
            total,
            correct,
            accuracy: rate(correct, total),
        }
    }
}

fn rate(correct: usize, total: usize) -> u8 {
    if total == 0 {
        0
    } else {
        round_percent(correct as f64 / total as f64 * 100.0)
    }
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Display, EnumIter, Serialize, Deserialize)]
pub enum ConfidenceBracket {
    #[strum(serialize = "90+%")]
    #[serde(rename = "90+%")]
    Ninety,

    #[strum(serialize = "80-89%")]
    #[serde(rename = "80-89%")]
    Eighty,

    #[strum(serialize = "70-79%")]
    #[serde(rename = "70-79%")]
    Seventy,

    #[strum(serialize = "60-69%")]
    #[serde(rename = "60-69%")]
    Sixty,

    #[strum(serialize = "<60%")]
    #[serde(rename = "<60%")]
    BelowSixty,
}
impl ConfidenceBracket {
    pub fn range(&self) -> RangeInclusive<u8> {
        match self {
            ConfidenceBracket::Ninety => 90..=100,
            ConfidenceBracket::Eighty => 80..=89,
            ConfidenceBracket::Seventy => 70..=79,
            ConfidenceBracket::Sixty => 60..=69,
            ConfidenceBracket::BelowSixty => 0..=59,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmPerformance {
    pub algorithm: AlgorithmLabel,

    #[serde(flatten)]
    pub tally: Tally,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketAccuracy {
    pub bracket: ConfidenceBracket,

    #[serde(flatten)]
    pub tally: Tally,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccuracyStats {
    pub total_predictions: usize,
    pub completed_predictions: usize,
    pub correct_predictions: usize,
    pub accuracy_rate: u8,
    pub pending_predictions: usize,
    pub high_confidence_accuracy: u8,
    pub low_risk_accuracy: u8,

    /// Algorithms that settled at least one prediction, in label order.
    pub algorithm_performance: Vec<AlgorithmPerformance>,

    /// Every bracket, best first, including empty ones.
    pub confidence_brackets: Vec<BracketAccuracy>,
}
impl AccuracyStats {
    pub fn compute(tracked: &[TrackedPrediction]) -> Self {
        let settled = tracked.iter().filter(|tracked| tracked.is_settled()).collect::<Vec<_>>();
        let overall = Tally::of(settled.iter().copied());

        let high_confidence = Tally::of(
            settled
                .iter()
                .copied()
                .filter(|tracked| tracked.prediction.confidence >= HIGH_CONFIDENCE),
        );
        let low_risk = Tally::of(
            settled
                .iter()
                .copied()
                .filter(|tracked| tracked.prediction.risk_level.is_low()),
        );

        let algorithm_performance = AlgorithmLabel::iter()
            .map(|algorithm| AlgorithmPerformance {
                algorithm,
                tally: Tally::of(
                    settled
                        .iter()
                        .copied()
                        .filter(|tracked| tracked.prediction.algorithm_label == algorithm),
                ),
            })
            .filter(|performance| performance.tally.total > 0)
            .collect();

        let confidence_brackets = ConfidenceBracket::iter()
            .map(|bracket| BracketAccuracy {
                bracket,
                tally: Tally::of(
                    settled
                        .iter()
                        .copied()
                        .filter(|tracked| bracket.range().contains(&tracked.prediction.confidence)),
                ),
            })
            .collect();

        Self {
            total_predictions: tracked.len(),
            completed_predictions: overall.total,
            correct_predictions: overall.correct,
            accuracy_rate: overall.accuracy,
            pending_predictions: tracked.len() - overall.total,
            high_confidence_accuracy: high_confidence.accuracy,
            low_risk_accuracy: low_risk.accuracy,
            algorithm_performance,
            confidence_brackets,
        }
    }
}
