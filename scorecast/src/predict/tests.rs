use assert_float_eq::*;
use scorecast_testing::{assert_descending, assert_within};

use crate::analysis::market::DEEP_MARKET_STRENGTH;
use crate::confidence::CONFIDENCE_BOUNDS;
use crate::domain::{RiskLevel, Sentiment};
use crate::testing::{deep_market, raw_odds, CLEAR_LEADER};

use super::*;

const FAVOURITES: [(&str, f64, f64); 4] = [
    ("1-0", 1.5, 60.0),
    ("0-0", 1.6, 58.0),
    ("1-1", 1.7, 55.0),
    ("0-1", 1.8, 50.0),
];

/// A family of deterministic odds sets of varying depth and shape.
fn fixtures() -> Vec<Vec<RawOdds>> {
    let mut fixtures = vec![
        raw_odds(&CLEAR_LEADER),
        raw_odds(&FAVOURITES),
        raw_odds(&[("3-3", 51.0, 0.5)]),
        raw_odds(&[("1-0", 5.0, 20.0), ("0-1", 5.0, 20.0)]),
        deep_market(),
    ];
    for depth in 1..=30 {
        let quotes = (0..depth)
            .map(|index| {
                let home = index / 6;
                let away = index % 6;
                let coefficient = 1.1 + ((index * 7919) % 97) as f64 / 4.0;
                let probability = 90.0 / coefficient + (index % 5) as f64;
                (format!("{home}-{away}"), coefficient, probability)
            })
            .collect::<Vec<_>>();
        fixtures.push(
            quotes
                .iter()
                .map(|(label, coefficient, probability)| RawOdds::new(label, *coefficient, *probability))
                .collect(),
        );
    }
    fixtures
}

#[test]
fn clear_leader() {
    let prediction = predict(&raw_odds(&CLEAR_LEADER));
    assert_eq!("2-1", prediction.predicted_score);
    // 52.965 + 6 (leader gap) + 5 (coefficient)
    assert_eq!(64, prediction.confidence);
    assert_eq!(RiskLevel::High, prediction.risk_level);
    assert_eq!(AlgorithmLabel::MultiAlgorithm, prediction.algorithm_label);
    assert!(prediction.alternative_scores.is_empty());

    let top = &prediction.top_predictions;
    assert_eq!(
        vec!["2-1", "1-1", "0-0"],
        top.iter().map(|top| top.score.as_str()).collect::<Vec<_>>()
    );
    assert_eq!(vec![30.0, 20.0, 10.0], top.iter().map(|top| top.probability).collect::<Vec<_>>());
    assert_float_absolute_eq!(52.97, top[0].final_score, 0.011);
    assert_float_absolute_eq!(33.45, top[1].final_score, 0.011);
    assert_float_absolute_eq!(15.69, top[2].final_score, 0.011);

    let market = &prediction.market_analysis;
    assert_eq!(3, market.total_scores_analyzed);
    assert_eq!(Sentiment::Negative, market.overall_sentiment);
    assert_f64_near!(5.0, market.avg_coefficient);
}

#[test]
fn empty_odds_fall_back() {
    let prediction = predict(&[]);
    assert_eq!("1-1", prediction.predicted_score);
    assert_eq!(45, prediction.confidence);
    assert_eq!(RiskLevel::VeryHigh, prediction.risk_level);
    assert_eq!(AlgorithmLabel::InsufficientData, prediction.algorithm_label);
    assert!(prediction.is_fallback());
    assert!(prediction.top_predictions.is_empty());
    assert!(prediction.alternative_scores.is_empty());
    assert_eq!(MarketSummary::empty(), prediction.market_analysis);
}

#[test]
fn all_invalid_falls_back() {
    let raw = vec![
        RawOdds::new("two-one", 3.0, 30.0),
        RawOdds::new("1-1", -4.0, 20.0),
        RawOdds::without_probability("", 8.0),
        RawOdds::default(),
    ];
    assert_eq!(Prediction::fallback(), predict(&raw));
}

#[test]
fn invalid_entries_ignored() {
    let mut raw = raw_odds(&CLEAR_LEADER);
    raw.insert(1, RawOdds::new("9:9", 1.01, 99.0));
    raw.push(RawOdds::new("5-0", 0.0, 80.0));
    assert_eq!(predict(&raw_odds(&CLEAR_LEADER)), predict(&raw));
}

#[test]
fn favourites_yield_capped_alternatives() {
    let prediction = predict(&raw_odds(&FAVOURITES));
    assert_eq!("1-0", prediction.predicted_score);
    // 85 (capped base) + 4 (leader gap) + 5 (coefficient)
    assert_eq!(94, prediction.confidence);
    assert_eq!(RiskLevel::VeryLow, prediction.risk_level);
    assert_eq!(AlgorithmLabel::Clustering, prediction.algorithm_label);
    assert_eq!(
        vec![
            AlternativeScore {
                score: "0-0".into(),
                probability: 92,
                coefficient: 1.6,
            },
            AlternativeScore {
                score: "1-1".into(),
                probability: 92,
                coefficient: 1.7,
            },
            AlternativeScore {
                score: "0-1".into(),
                probability: 92,
                coefficient: 1.8,
            },
        ],
        prediction.alternative_scores
    );
}

#[test]
fn deep_market_prediction() {
    let prediction = predict(&deep_market());
    assert_eq!("1-0", prediction.predicted_score);
    assert_eq!(95, prediction.confidence);
    assert_eq!(RiskLevel::VeryLow, prediction.risk_level);
    assert_eq!(AlgorithmLabel::MarketAnalysis, prediction.algorithm_label);
    assert_eq!(6, prediction.top_predictions.len());
    assert_eq!(25, prediction.market_analysis.total_scores_analyzed);
    assert_eq!(DEEP_MARKET_STRENGTH, prediction.market_analysis.market_strength);
}

#[test]
fn algorithm_label_follows_primary_entry() {
    let prediction = predict(&raw_odds(&[CLEAR_LEADER[1], CLEAR_LEADER[0], CLEAR_LEADER[2]]));
    assert_eq!("2-1", prediction.predicted_score);
    // "1-1" leads the input with a pattern match of 1.25; the primary "2-1" has neither multiplier
    assert_eq!(AlgorithmLabel::MultiAlgorithm, prediction.algorithm_label);
}

#[test]
fn overflowing_final_score_discarded() {
    let prediction = predict(&raw_odds(&[("1-0", 1e-306, 50.0), ("0-0", 4.0, 20.0)]));
    assert_eq!("0-0", prediction.predicted_score);
    assert_eq!(1, prediction.top_predictions.len());
    assert!(prediction.top_predictions.iter().all(|top| top.final_score.is_finite()));
    assert_eq!(1, prediction.market_analysis.total_scores_analyzed);

    let json = serde_json::to_string(&prediction).unwrap();
    assert!(!json.contains("null"));
    let decoded: Prediction = serde_json::from_str(&json).unwrap();
    assert_eq!("0-0", decoded.predicted_score);

    assert_eq!(Prediction::fallback(), predict(&raw_odds(&[("1-0", 1e-306, 50.0)])));
}

#[test]
fn single_entry() {
    let prediction = predict(&raw_odds(&[("3-3", 51.0, 0.5)]));
    assert_eq!("3-3", prediction.predicted_score);
    assert_eq!(45, prediction.confidence);
    assert_eq!(RiskLevel::VeryHigh, prediction.risk_level);
    assert_eq!(1, prediction.top_predictions.len());
}

#[test]
fn ties_resolved_by_input_order() {
    let prediction = predict(&raw_odds(&[("1-0", 5.0, 20.0), ("0-1", 5.0, 20.0)]));
    assert_eq!("1-0", prediction.predicted_score);
    let reversed = predict(&raw_odds(&[("0-1", 5.0, 20.0), ("1-0", 5.0, 20.0)]));
    assert_eq!("0-1", reversed.predicted_score);
}

#[test]
fn confidence_always_bounded() {
    for raw in fixtures() {
        let prediction = predict(&raw);
        assert_within(CONFIDENCE_BOUNDS, prediction.confidence);
    }
}

#[test]
fn predicted_score_never_fabricated() {
    for raw in fixtures() {
        let prediction = predict(&raw);
        let labels = normalise(&raw).into_iter().map(|entry| entry.label).collect::<Vec<_>>();
        assert!(
            labels.contains(&prediction.predicted_score),
            "{} not among {labels:?}",
            prediction.predicted_score
        );
    }
}

#[test]
fn risk_level_follows_table() {
    for raw in fixtures() {
        let prediction = predict(&raw);
        let primary = normalise(&raw)
            .into_iter()
            .find(|entry| entry.label == prediction.predicted_score)
            .unwrap();
        assert_eq!(
            risk_level::classify(prediction.confidence, primary.coefficient),
            prediction.risk_level
        );
    }
}

#[test]
fn top_predictions_descending() {
    for raw in fixtures() {
        let prediction = predict(&raw);
        assert!(prediction.top_predictions.len() <= 6);
        assert_eq!(prediction.predicted_score, prediction.top_predictions[0].score);
        let final_scores = prediction
            .top_predictions
            .iter()
            .map(|top| top.final_score)
            .collect::<Vec<_>>();
        assert_descending(&final_scores);
    }
}

#[test]
fn alternatives_capped_and_ranked_below_primary() {
    for raw in fixtures() {
        let prediction = predict(&raw);
        for alternative in &prediction.alternative_scores {
            assert!(alternative.probability <= 92);
            assert_ne!(prediction.predicted_score, alternative.score);
        }
    }
}

#[test]
fn idempotent() {
    for raw in fixtures() {
        let first = predict(&raw);
        let second = predict(&raw);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}

#[test]
fn serialized_field_names() {
    let json = serde_json::to_value(predict(&raw_odds(&CLEAR_LEADER))).unwrap();
    assert_eq!("2-1", json["predictedScore"]);
    assert_eq!(64, json["confidence"]);
    assert_eq!("High", json["riskLevel"]);
    assert_eq!("MultiAlgorithm", json["algorithmUsed"]);
    assert_eq!("2-1", json["topPredictions"][0]["score"]);
    assert_eq!("Negative", json["marketAnalysis"]["overallSentiment"]);
    assert!(json["alternativeScores"].as_array().unwrap().is_empty());
}

#[test]
fn custom_config() {
    let predictor = Predictor::try_from(Config {
        top_predictions: 2,
        alternatives: 1..2,
        alternative_min_score: 0.0,
        alternative_probability_cap: 50,
    })
    .unwrap();
    let prediction = predictor.predict(&raw_odds(&CLEAR_LEADER));
    assert_eq!(2, prediction.top_predictions.len());
    assert_eq!(
        vec![AlternativeScore {
            score: "1-1".into(),
            probability: 33,
            coefficient: 4.0,
        }],
        prediction.alternative_scores
    );
}

#[test]
fn invalid_config() {
    fn err(config: Config) -> String {
        Predictor::try_from(config).unwrap_err().to_string()
    }
    assert_eq!(
        "at least one top prediction must be reported",
        err(Config {
            top_predictions: 0,
            ..Config::default()
        })
    );
    assert_eq!(
        "alternatives cannot include the primary prediction",
        err(Config {
            alternatives: 0..3,
            ..Config::default()
        })
    );
    assert_eq!(
        "alternatives range 2..2 is empty",
        err(Config {
            alternatives: 2..2,
            ..Config::default()
        })
    );
    assert_eq!(
        "alternative probability cap (101) cannot exceed 100",
        err(Config {
            alternative_probability_cap: 101,
            ..Config::default()
        })
    );
}
