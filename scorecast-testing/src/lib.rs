//! Testing helpers.

use std::fmt::Debug;
use std::ops::RangeInclusive;

use assert_float_eq::*;

pub fn assert_slice_f64_relative(expected: &[f64], actual: &[f64], epsilon: f64) {
    assert_eq!(
        expected.len(),
        actual.len(),
        "lengths do not match: {} ≠ {}",
        expected.len(),
        actual.len()
    );
    for (index, &expected) in expected.iter().enumerate() {
        let actual = actual[index];
        if actual != expected {
            assert_float_relative_eq!(expected, actual, epsilon);
        }
    }
}

/// Asserts that `actual` lies within the inclusive `bounds`.
pub fn assert_within<T: PartialOrd + Debug>(bounds: RangeInclusive<T>, actual: T) {
    assert!(
        bounds.contains(&actual),
        "{actual:?} outside of {bounds:?}"
    );
}

/// Asserts that `actual` is sorted in non-increasing order.
pub fn assert_descending(actual: &[f64]) {
    for window in actual.windows(2) {
        assert!(
            window[0] >= window[1],
            "{} precedes {} in {actual:?}",
            window[0],
            window[1]
        );
    }
}
