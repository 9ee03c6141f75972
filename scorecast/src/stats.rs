//! Descriptive statistics over slices of quotations.

pub trait SliceExt {
    fn sum(&self) -> f64;
    fn mean(&self) -> f64;
    fn stdev(&self) -> f64;
    fn lowest(&self) -> f64;
    fn highest(&self) -> f64;
}
impl SliceExt for [f64] {
    fn sum(&self) -> f64 {
        self.iter().sum()
    }

    /// Arithmetic mean; zero for an empty slice.
    fn mean(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.sum() / self.len() as f64
        }
    }

    /// Population standard deviation; zero for an empty slice.
    fn stdev(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let mean = self.mean();
        let variance = self
            .iter()
            .map(|value| (value - mean).powi(2))
            .sum::<f64>()
            / self.len() as f64;
        variance.sqrt()
    }

    fn lowest(&self) -> f64 {
        self.iter().copied().fold(f64::INFINITY, f64::min)
    }

    fn highest(&self) -> f64 {
        self.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Rounds `value` to the given number of decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Rounds a non-negative `value` to the nearest integer and saturates it into a `u8` percentage.
pub fn round_percent(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}
