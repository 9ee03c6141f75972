//! Detection of notable patterns across a deep set of quotations: low-scoring tendencies,
//! value opportunities, safe bets, upset potential and market inefficiencies.

use ordinalizer::Ordinal;
use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumCount, EnumIter};
use tracing::debug;

use crate::analysis::pattern::ScoringPattern;
use crate::domain::error::InsufficientData;
use crate::domain::{OddsEntry, RiskLevel};
use crate::stats::{round_to, SliceExt};

/// Fewest valid entries the detectors will work with.
pub const MIN_ENTRIES: usize = 10;

/// A pattern is counted towards [`PatternReport::patterns_detected`] above this strength.
pub const NOTABLE_STRENGTH: f64 = 0.6;

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Display, EnumCount, EnumIter, Ordinal, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PatternKind {
    LowScoring,
    HighValue,
    SafeBets,
    Upsets,
    MarketInefficiency,
}
impl PatternKind {
    /// Contribution of a detected pattern to the overall pattern confidence.
    pub fn confidence_weight(&self) -> f64 {
        match self {
            PatternKind::LowScoring => 0.15,
            PatternKind::HighValue => 0.25,
            PatternKind::SafeBets => 0.40,
            PatternKind::Upsets => 0.05,
            PatternKind::MarketInefficiency => 0.15,
        }
    }

    fn top_count(&self) -> usize {
        match self {
            PatternKind::SafeBets | PatternKind::Upsets => 2,
            _ => 3,
        }
    }

    fn matches(&self, entry: &OddsEntry) -> bool {
        match self {
            PatternKind::LowScoring => ScoringPattern::of(&entry.score) == ScoringPattern::LowScoring,
            PatternKind::HighValue => value(entry) >= 2.0,
            PatternKind::SafeBets => entry.coefficient <= 4.0 && entry.probability >= 20.0,
            PatternKind::Upsets => entry.coefficient >= 8.0 && entry.probability >= 8.0,
            PatternKind::MarketInefficiency => {
                (entry.probability - entry.implied_probability()).abs() >= 10.0
            }
        }
    }

    fn strength(&self, count: usize, total: usize) -> f64 {
        let count = count as f64;
        match self {
            PatternKind::LowScoring => round_to(count / total as f64, 2),
            PatternKind::HighValue => f64::min(1.0, count / 5.0),
            PatternKind::SafeBets => f64::min(1.0, count / 3.0),
            PatternKind::Upsets => f64::min(0.8, count / 4.0),
            PatternKind::MarketInefficiency => f64::min(1.0, 2.0 * count / total as f64),
        }
    }

    fn is_detected(&self, count: usize, strength: f64) -> bool {
        match self {
            PatternKind::LowScoring => strength > 0.4,
            _ => count > 0,
        }
    }
}

fn value(entry: &OddsEntry) -> f64 {
    entry.probability / entry.coefficient
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternSignal {
    pub kind: PatternKind,
    pub detected: bool,
    pub strength: f64,
    pub count: usize,

    /// Mean coefficient of the matching entries (2 dp); zero when none match.
    pub avg_coefficient: f64,

    pub top_scores: Vec<OddsEntry>,
}
impl PatternSignal {
    fn detect(kind: PatternKind, entries: &[OddsEntry]) -> Self {
        let mut matching = entries
            .iter()
            .filter(|entry| kind.matches(entry))
            .cloned()
            .collect::<Vec<_>>();
        let count = matching.len();
        let strength = kind.strength(count, entries.len());
        let coefficients = matching.iter().map(|entry| entry.coefficient).collect::<Vec<_>>();

        match kind {
            PatternKind::HighValue => matching.sort_by(|a, b| value(b).total_cmp(&value(a))),
            _ => matching.sort_by(|a, b| b.probability.total_cmp(&a.probability)),
        }
        matching.truncate(kind.top_count());

        Self {
            kind,
            detected: kind.is_detected(count, strength),
            strength,
            count,
            avg_coefficient: round_to(coefficients.mean(), 2),
            top_scores: matching,
        }
    }

    fn is_strong(&self, min_strength: f64) -> bool {
        self.detected && self.strength > min_strength
    }
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Display, EnumIter, Serialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Display, EnumIter, Serialize)]
pub enum RecommendationKind {
    SafeBet,
    HighValue,
    LowScoringMatch,
    UpsetPotential,
}
impl RecommendationKind {
    /// The pattern that triggers this recommendation, and the strength it must exceed.
    fn trigger(&self) -> (PatternKind, f64) {
        match self {
            RecommendationKind::SafeBet => (PatternKind::SafeBets, 0.7),
            RecommendationKind::HighValue => (PatternKind::HighValue, 0.6),
            RecommendationKind::LowScoringMatch => (PatternKind::LowScoring, 0.6),
            RecommendationKind::UpsetPotential => (PatternKind::Upsets, 0.5),
        }
    }

    fn priority(&self) -> Priority {
        match self {
            RecommendationKind::SafeBet => Priority::High,
            RecommendationKind::HighValue | RecommendationKind::LowScoringMatch => Priority::Medium,
            RecommendationKind::UpsetPotential => Priority::Low,
        }
    }

    fn confidence(&self) -> u8 {
        match self {
            RecommendationKind::SafeBet => 95,
            RecommendationKind::HighValue => 85,
            RecommendationKind::LowScoringMatch => 80,
            RecommendationKind::UpsetPotential => 60,
        }
    }

    fn message(&self, signal: &PatternSignal) -> String {
        match self {
            RecommendationKind::SafeBet => format!("{} safe bets detected, strong recommendation", signal.count),
            RecommendationKind::HighValue => format!("{} high-value opportunities identified", signal.count),
            RecommendationKind::LowScoringMatch => "low-scoring match likely, favour 0-0, 1-0 and 0-1".into(),
            RecommendationKind::UpsetPotential => "upset potential detected, risky but rewarding".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternRecommendation {
    pub kind: RecommendationKind,
    pub priority: Priority,
    pub message: String,
    pub scores: Vec<OddsEntry>,
    pub confidence: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternRisk {
    pub score: u8,
    pub level: RiskLevel,
}
impl PatternRisk {
    const BASE: i16 = 50;
    const LEVELS: [(i16, RiskLevel); 4] = [
        (30, RiskLevel::VeryLow),
        (45, RiskLevel::Low),
        (60, RiskLevel::Moderate),
        (75, RiskLevel::High),
    ];

    fn assess(signals: &[PatternSignal]) -> Self {
        let mut score = Self::BASE;
        if signals[PatternKind::SafeBets.ordinal()].is_strong(0.7) {
            score -= 20;
        }
        if signals[PatternKind::Upsets.ordinal()].is_strong(0.6) {
            score += 15;
        }
        if signals[PatternKind::MarketInefficiency.ordinal()].is_strong(0.7) {
            score += 10;
        }
        let level = Self::LEVELS
            .iter()
            .find(|(max_score, _)| score <= *max_score)
            .map_or(RiskLevel::VeryHigh, |&(_, level)| level);
        Self {
            score: score.clamp(10, 90) as u8,
            level,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternReport {
    pub total_scores_analyzed: usize,
    pub patterns_detected: usize,

    /// One signal per [`PatternKind`], indexed by ordinal.
    pub patterns: Vec<PatternSignal>,
    pub recommendations: Vec<PatternRecommendation>,
    pub confidence: u8,
    pub risk_assessment: PatternRisk,
}
impl PatternReport {
    pub fn signal(&self, kind: PatternKind) -> &PatternSignal {
        &self.patterns[kind.ordinal()]
    }
}

/// Runs every detector over the valid `entries`, failing when there are fewer than
/// [`MIN_ENTRIES`] of them.
pub fn detect(entries: &[OddsEntry]) -> Result<PatternReport, InsufficientData> {
    if entries.len() < MIN_ENTRIES {
        return Err(InsufficientData {
            required: MIN_ENTRIES,
            actual: entries.len(),
        });
    }

    let patterns = PatternKind::iter()
        .map(|kind| PatternSignal::detect(kind, entries))
        .collect::<Vec<_>>();

    let mut recommendations = RecommendationKind::iter()
        .filter_map(|kind| {
            let (pattern, min_strength) = kind.trigger();
            let signal = &patterns[pattern.ordinal()];
            signal.is_strong(min_strength).then(|| PatternRecommendation {
                kind,
                priority: kind.priority(),
                message: kind.message(signal),
                scores: signal.top_scores.clone(),
                confidence: kind.confidence(),
            })
        })
        .collect::<Vec<_>>();
    recommendations.sort_by(|a, b| b.priority.cmp(&a.priority));

    let confidence = patterns
        .iter()
        .filter(|signal| signal.detected)
        .map(|signal| signal.strength * signal.kind.confidence_weight() * 100.0)
        .sum::<f64>()
        .round()
        .min(95.0) as u8;

    let patterns_detected = patterns
        .iter()
        .filter(|signal| signal.strength > NOTABLE_STRENGTH)
        .count();
    debug!("{patterns_detected} notable patterns among {} entries", entries.len());

    Ok(PatternReport {
        total_scores_analyzed: entries.len(),
        patterns_detected,
        risk_assessment: PatternRisk::assess(&patterns),
        patterns,
        recommendations,
        confidence,
    })
}
