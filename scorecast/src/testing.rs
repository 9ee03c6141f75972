//! Fixtures shared by the unit tests.

use crate::domain::normalise::normalise;
use crate::domain::{OddsEntry, RawOdds};
use crate::features::{self, DerivedEntry};

pub fn raw_odds(quotes: &[(&str, f64, f64)]) -> Vec<RawOdds> {
    quotes.iter().map(|&quote| RawOdds::from(quote)).collect()
}

pub fn entries(quotes: &[(&str, f64, f64)]) -> Vec<OddsEntry> {
    normalise(&raw_odds(quotes))
}

pub fn derived(quotes: &[(&str, f64, f64)]) -> Vec<DerivedEntry> {
    features::derive(&entries(quotes))
}

/// Three quotations with a clear leader.
pub const CLEAR_LEADER: [(&str, f64, f64); 3] = [("2-1", 3.0, 30.0), ("1-1", 4.0, 20.0), ("0-0", 8.0, 10.0)];

/// A deep market: 25 distinct scores with coefficients from 1.2 to 20 and a probability mass of 98.
pub fn deep_market() -> Vec<RawOdds> {
    let labels = [
        "1-0", "1-1", "0-0", "2-1", "0-1", "2-0", "1-2", "2-2", "0-2", "3-1", "3-0", "1-3", "3-2",
        "2-3", "0-3", "3-3", "4-0", "4-1", "0-4", "1-4", "4-2", "2-4", "4-3", "3-4", "4-4",
    ];
    labels
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let coefficient = 1.2 + index as f64 * (20.0 - 1.2) / 24.0;
            let probability = if index == 0 { 26.0 } else { 3.0 };
            RawOdds::new(label, coefficient, probability)
        })
        .collect()
}
