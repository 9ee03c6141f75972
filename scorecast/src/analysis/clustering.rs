use crate::features::DerivedEntry;
use crate::stats::SliceExt;

pub const STRONG_FAVOURITE: f64 = 1.4;
pub const FAVOURITE: f64 = 1.2;
pub const NEUTRAL: f64 = 1.0;
pub const OUTSIDER: f64 = 0.8;

/// Mean and population standard deviation of the quoted coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientSpread {
    pub mean: f64,
    pub stdev: f64,
}
impl CoefficientSpread {
    pub fn of(coefficients: &[f64]) -> Self {
        Self {
            mean: coefficients.mean(),
            stdev: coefficients.stdev(),
        }
    }

    /// Rewards coefficients below the mean, more so when they sit a full deviation below it.
    pub fn cluster_score(&self, coefficient: f64) -> f64 {
        if coefficient < self.mean - self.stdev {
            STRONG_FAVOURITE
        } else if coefficient < self.mean {
            FAVOURITE
        } else if coefficient < self.mean + self.stdev {
            NEUTRAL
        } else {
            OUTSIDER
        }
    }
}

pub fn cluster_scores(entries: &[DerivedEntry]) -> Vec<f64> {
    let coefficients = entries.iter().map(|entry| entry.coefficient).collect::<Vec<_>>();
    let spread = CoefficientSpread::of(&coefficients);
    coefficients
        .iter()
        .map(|&coefficient| spread.cluster_score(coefficient))
        .collect()
}
