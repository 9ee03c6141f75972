use std::fmt::{Display, Formatter};
use std::str::FromStr;

use bincode::Encode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{Display, EnumCount, EnumIter};

use crate::domain::error::InvalidScore;

pub mod error;
pub mod normalise;

/// A final match score, home goals first.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Encode)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}
impl Score {
    pub fn new(home: u32, away: u32) -> Self {
        Self { home, away }
    }

    pub fn nil_all() -> Self {
        Self { home: 0, away: 0 }
    }

    pub fn total(&self) -> u64 {
        self.home as u64 + self.away as u64
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.home, self.away)
    }
}

impl FromStr for Score {
    type Err = InvalidScore;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (home, away) = trimmed
            .split_once('-')
            .ok_or_else(|| InvalidScore::Format(s.into()))?;
        Ok(Self {
            home: parse_goals(home, s)?,
            away: parse_goals(away, s)?,
        })
    }
}

fn parse_goals(frag: &str, label: &str) -> Result<u32, InvalidScore> {
    if frag.is_empty() || !frag.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(InvalidScore::Format(label.into()));
    }
    frag.parse()
        .map_err(|_| InvalidScore::GoalsOutOfRange(label.into()))
}

/// A quotation as it arrives from a bookmaker feed or a user form, before any checking. Each field
/// is captured verbatim so that numbers encoded as strings, missing values and outright garbage can
/// all be judged in one place.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawOdds {
    #[serde(default)]
    pub score: Option<Value>,

    #[serde(default)]
    pub coefficient: Option<Value>,

    #[serde(default)]
    pub probability: Option<Value>,
}
impl RawOdds {
    pub fn new(score: &str, coefficient: f64, probability: f64) -> Self {
        Self {
            score: Some(Value::from(score)),
            coefficient: Some(Value::from(coefficient)),
            probability: Some(Value::from(probability)),
        }
    }

    pub fn without_probability(score: &str, coefficient: f64) -> Self {
        Self {
            score: Some(Value::from(score)),
            coefficient: Some(Value::from(coefficient)),
            probability: None,
        }
    }
}

impl From<(&str, f64, f64)> for RawOdds {
    fn from((score, coefficient, probability): (&str, f64, f64)) -> Self {
        Self::new(score, coefficient, probability)
    }
}

/// A well-formed quotation for a single correct-score outcome. The `label` is the trimmed score
/// string exactly as quoted and acts as the join key through the rest of the pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Encode)]
#[serde(rename_all = "camelCase")]
pub struct OddsEntry {
    #[serde(rename = "score")]
    pub label: String,

    #[serde(skip)]
    pub score: Score,

    pub coefficient: f64,

    /// The stated probability, or the implied one where none was stated.
    pub probability: f64,

    /// The probability as quoted, if it was quoted at all.
    #[serde(skip)]
    pub stated_probability: Option<f64>,
}
impl OddsEntry {
    /// Percentage probability implied by the coefficient alone.
    pub fn implied_probability(&self) -> f64 {
        implied_probability(self.coefficient)
    }

    /// The stated probability, counting an unstated one as zero.
    pub fn stated_or_zero(&self) -> f64 {
        self.stated_probability.unwrap_or(0.0)
    }
}

pub fn implied_probability(coefficient: f64) -> f64 {
    100.0 / coefficient
}

#[derive(
    Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Display, EnumCount, EnumIter, Serialize, Deserialize,
)]
pub enum RiskLevel {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}
impl RiskLevel {
    pub fn is_low(&self) -> bool {
        matches!(self, RiskLevel::VeryLow | RiskLevel::Low)
    }
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Display, EnumIter, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}
