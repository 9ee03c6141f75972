//! Discrete risk classification of a prediction.

use crate::domain::RiskLevel;

/// Minimum confidence and maximum coefficient for each classification, evaluated in order, first
/// match wins. A `None` coefficient ceiling places no constraint on the coefficient.
pub const RISK_TABLE: [(u8, Option<f64>, RiskLevel); 4] = [
    (85, Some(4.0), RiskLevel::VeryLow),
    (75, Some(6.0), RiskLevel::Low),
    (65, Some(10.0), RiskLevel::Moderate),
    (55, None, RiskLevel::High),
];

pub fn classify(confidence: u8, coefficient: f64) -> RiskLevel {
    RISK_TABLE
        .iter()
        .find(|(min_confidence, max_coefficient, _)| {
            confidence >= *min_confidence
                && max_coefficient.map_or(true, |max_coefficient| coefficient <= max_coefficient)
        })
        .map_or(RiskLevel::VeryHigh, |(_, _, risk_level)| *risk_level)
}
