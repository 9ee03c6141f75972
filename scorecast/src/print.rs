//! Tabular console rendering of predictions, validations and market reports.

use stanza::style::HAlign::Left;
use stanza::style::{HAlign, Header, MinWidth, Styles};
use stanza::table::{Col, Row, Table};

use crate::overview::OddsOverview;
use crate::patterns::PatternReport;
use crate::predict::Prediction;
use crate::validation::ValidationResult;

fn header(labels: &[&str]) -> Row {
    Row::new(
        Styles::default().with(Header(true)),
        labels.iter().map(|&label| label.into()).collect(),
    )
}

fn key_value_table() -> Table {
    Table::default().with_cols(vec![
        Col::new(Styles::default().with(MinWidth(20)).with(Left)),
        Col::new(Styles::default().with(MinWidth(15)).with(HAlign::Right)),
    ])
}

pub fn tabulate_summary(prediction: &Prediction) -> Table {
    let market = &prediction.market_analysis;
    let mut table = key_value_table();
    for (key, value) in [
        ("Predicted score", prediction.predicted_score.clone()),
        ("Confidence", format!("{}%", prediction.confidence)),
        ("Risk level", prediction.risk_level.to_string()),
        ("Algorithm", prediction.algorithm_label.to_string()),
        ("Scores analysed", market.total_scores_analyzed.to_string()),
        ("Sentiment", market.overall_sentiment.to_string()),
        ("Avg. coefficient", format!("{:.2}", market.avg_coefficient)),
        ("Probability range", format!("{:.2}", market.confidence_range)),
        ("Market strength", format!("{:.1}", market.market_strength)),
    ] {
        table.push_row(Row::new(Styles::default(), vec![key.into(), value.into()]));
    }
    table
}

pub fn tabulate_top_predictions(prediction: &Prediction) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(5)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(Left)),
            Col::new(Styles::default().with(MinWidth(12)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(12)).with(HAlign::Right)),
        ])
        .with_row(header(&["Rank", "Score", "Probability", "Final score"]));
    for (rank, top) in prediction.top_predictions.iter().enumerate() {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                format!("{}", rank + 1).into(),
                top.score.clone().into(),
                format!("{:.0}%", top.probability).into(),
                format!("{:.2}", top.final_score).into(),
            ],
        ));
    }
    table
}

pub fn tabulate_alternatives(prediction: &Prediction) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(8)).with(Left)),
            Col::new(Styles::default().with(MinWidth(12)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(12)).with(HAlign::Right)),
        ])
        .with_row(header(&["Score", "Probability", "Coefficient"]));
    for alternative in &prediction.alternative_scores {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                alternative.score.clone().into(),
                format!("{}%", alternative.probability).into(),
                format!("{:.2}", alternative.coefficient).into(),
            ],
        ));
    }
    table
}

pub fn tabulate_validation(result: &ValidationResult) -> Table {
    let mut table = key_value_table().with_row(header(&["Metric", "Score"]));
    for (metric, score) in &result.metrics {
        table.push_row(Row::new(
            Styles::default(),
            vec![metric.to_string().into(), score.to_string().into()],
        ));
    }
    for (key, value) in [
        ("Validation score", result.validation_score.to_string()),
        ("Valid", result.is_valid.to_string()),
        ("Recommendation", result.recommendation.to_string()),
    ] {
        table.push_row(Row::new(
            Styles::default().with(Header(true)),
            vec![key.into(), value.into()],
        ));
    }
    table
}

pub fn tabulate_patterns(report: &PatternReport) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(20)).with(Left)),
            Col::new(Styles::default().with(MinWidth(9)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(9)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(15)).with(Left)),
        ])
        .with_row(header(&["Pattern", "Detected", "Strength", "Count", "Top scores"]));
    for signal in &report.patterns {
        let top_scores = signal
            .top_scores
            .iter()
            .map(|entry| entry.label.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        table.push_row(Row::new(
            Styles::default(),
            vec![
                signal.kind.to_string().into(),
                signal.detected.to_string().into(),
                format!("{:.2}", signal.strength).into(),
                signal.count.to_string().into(),
                top_scores.into(),
            ],
        ));
    }
    table
}

pub fn tabulate_overview(overview: &OddsOverview) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(8)).with(Left)),
            Col::new(Styles::default().with(MinWidth(12)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(12)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(10)).with(Left)),
            Col::new(Styles::default().with(MinWidth(10)).with(Left)),
        ])
        .with_row(header(&["Score", "Coefficient", "Probability", "Value", "Risk", "Potential"]));
    for insight in &overview.top_scores {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                insight.score.clone().into(),
                format!("{:.2}", insight.coefficient).into(),
                format!("{:.1}%", insight.probability).into(),
                format!("{:.2}", insight.value).into(),
                insight.risk.to_string().into(),
                insight.success_potential.to_string().into(),
            ],
        ));
    }
    table
}
