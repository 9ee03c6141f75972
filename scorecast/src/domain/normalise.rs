//! Screening of raw quotations. Malformed records are dropped rather than reported as errors; the
//! rejection reason is only traced.

use std::str::FromStr;

use serde_json::Value;
use tracing::trace;

use crate::domain::error::{InvalidScore, RejectedOdds};
use crate::domain::{implied_probability, OddsEntry, RawOdds, Score};

impl TryFrom<&RawOdds> for OddsEntry {
    type Error = RejectedOdds;

    fn try_from(raw: &RawOdds) -> Result<Self, Self::Error> {
        let label = match &raw.score {
            None | Some(Value::Null) => return Err(RejectedOdds::MissingScore),
            Some(Value::String(label)) => label.trim(),
            Some(other) => return Err(InvalidScore::Format(other.to_string()).into()),
        };
        let score = Score::from_str(label)?;

        let coefficient = match &raw.coefficient {
            None | Some(Value::Null) => return Err(RejectedOdds::MissingCoefficient),
            Some(value) => {
                as_number(value).ok_or_else(|| RejectedOdds::UnparseableCoefficient(value.to_string()))?
            }
        };
        if !coefficient.is_finite() || coefficient <= 0.0 {
            return Err(RejectedOdds::NonPositiveCoefficient(coefficient));
        }

        let stated_probability = raw
            .probability
            .as_ref()
            .and_then(as_number)
            .filter(|probability| probability.is_finite() && *probability >= 0.0);

        Ok(Self {
            label: label.into(),
            score,
            coefficient,
            probability: stated_probability.unwrap_or_else(|| implied_probability(coefficient)),
            stated_probability,
        })
    }
}

/// Reads a number that may have been encoded either natively or as a string.
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Retains the well-formed quotations, in their original order.
pub fn normalise(raw: &[RawOdds]) -> Vec<OddsEntry> {
    raw.iter()
        .enumerate()
        .filter_map(|(index, raw)| match OddsEntry::try_from(raw) {
            Ok(entry) => Some(entry),
            Err(err) => {
                trace!("dropping quotation {index}: {err}");
                None
            }
        })
        .collect()
}
