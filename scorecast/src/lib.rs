//! Correct-score prediction from bookmaker quotations, and an independent plausibility check of
//! the predictions so made.
//!
//! The prediction pipeline screens the raw quotations, derives per-entry features, runs four
//! factor analysers over the valid set, blends everything into a single ranking score, and
//! reports the leading score alongside a bounded confidence and a risk classification. Every stage
//! is a pure function of its input.

pub mod accuracy;
pub mod analysis;
pub mod cache;
pub mod combine;
pub mod confidence;
pub mod domain;
pub mod features;
pub mod file;
pub mod overview;
pub mod patterns;
pub mod predict;
pub mod print;
pub mod rank;
pub mod risk_level;
pub mod stats;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

#[doc = include_str!("../../README.md")]
#[cfg(doc)]
fn readme() {}
