use std::env;
use std::error::Error;
use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use serde::Serialize;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info, warn};

use scorecast::domain::normalise::normalise;
use scorecast::file::{read_json, Fixture};
use scorecast::overview::{overview, OddsOverview};
use scorecast::patterns::{detect, PatternReport};
use scorecast::predict::{Prediction, Predictor};
use scorecast::print;
use scorecast::validation::{self, ValidationResult, Validator};

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// file to source the quotations from
    #[clap(short = 'f', long)]
    file: Option<PathBuf>,

    /// validate the prediction against its quotations
    #[clap(long)]
    validate: bool,

    /// apply the stricter validity threshold
    #[clap(long)]
    strict: bool,

    /// detect patterns across the quotations
    #[clap(long)]
    patterns: bool,

    /// print an overview of the market
    #[clap(long)]
    overview: bool,

    /// emit JSON rather than tables
    #[clap(long)]
    json: bool,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if self.file.is_none() {
            bail!("the -f flag must be specified");
        }
        if self.strict && !self.validate {
            bail!("--strict only applies with --validate");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    fixture: Option<String>,
    prediction: Prediction,
    #[serde(skip_serializing_if = "Option::is_none")]
    validation: Option<ValidationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    patterns: Option<PatternReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    overview: Option<OddsOverview>,
}

fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let path = args.file.as_ref().ok_or("the -f flag must be specified")?;
    let fixture: Fixture = read_json(path)?;
    let raw = fixture.score_odds();
    if let Some(title) = fixture.title() {
        info!("fixture: {title}");
    }
    info!("read {} quotations from {}", raw.len(), path.display());

    let prediction = Predictor::default().predict(raw);
    let validation = if args.validate {
        let config = if args.strict {
            validation::Config::strict()
        } else {
            validation::Config::default()
        };
        Some(Validator::try_from(config)?.validate(&prediction, raw))
    } else {
        None
    };

    let entries = normalise(raw);
    let patterns = if args.patterns {
        match detect(&entries) {
            Ok(report) => Some(report),
            Err(err) => {
                warn!("skipping pattern detection: {err}");
                None
            }
        }
    } else {
        None
    };
    let overview = if args.overview { overview(&entries) } else { None };

    let report = Report {
        fixture: fixture.title(),
        prediction,
        validation,
        patterns,
        overview,
    };
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &Report) {
    let console = Console::default();
    info!("Prediction:\n{}", console.render(&print::tabulate_summary(&report.prediction)));
    if !report.prediction.top_predictions.is_empty() {
        info!(
            "Top predictions:\n{}",
            console.render(&print::tabulate_top_predictions(&report.prediction))
        );
    }
    if !report.prediction.alternative_scores.is_empty() {
        info!(
            "Alternatives:\n{}",
            console.render(&print::tabulate_alternatives(&report.prediction))
        );
    }
    if let Some(validation) = &report.validation {
        info!(
            "Validation ({}):\n{}",
            validation.recommendation.description(),
            console.render(&print::tabulate_validation(validation))
        );
    }
    if let Some(patterns) = &report.patterns {
        info!(
            "Patterns (confidence {}%, risk {}):\n{}",
            patterns.confidence,
            patterns.risk_assessment.level,
            console.render(&print::tabulate_patterns(patterns))
        );
        for recommendation in &patterns.recommendations {
            info!("{} [{}]: {}", recommendation.kind, recommendation.priority, recommendation.message);
        }
    }
    if let Some(overview) = &report.overview {
        info!(
            "Overview ({} analysed, mood {}):\n{}",
            overview.metrics.total_analyzed,
            overview.metrics.market_mood,
            console.render(&print::tabulate_overview(overview))
        );
    }
}
