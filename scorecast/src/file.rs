//! Reading of JSON-encoded quotation files.

use std::fs::File;
use std::io::{BufReader, Error};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::from_reader;

use crate::domain::RawOdds;

/// Reads a JSON-encoded type from a given file `path`.
pub fn read_json<D: DeserializeOwned>(path: impl AsRef<Path>) -> Result<D, Error> {
    let file = File::open(path)?;
    Ok(from_reader(BufReader::new(file))?)
}

/// A fixture document: either a bare list of quotations, or the quotations together with the
/// names of the sides.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Fixture {
    Bare(Vec<RawOdds>),
    #[serde(rename_all = "camelCase")]
    Described {
        #[serde(default)]
        home_team: Option<String>,
        #[serde(default)]
        away_team: Option<String>,
        score_odds: Vec<RawOdds>,
    },
}
impl Fixture {
    pub fn score_odds(&self) -> &[RawOdds] {
        match self {
            Fixture::Bare(score_odds) | Fixture::Described { score_odds, .. } => score_odds,
        }
    }

    /// "Home v Away", if both sides are named.
    pub fn title(&self) -> Option<String> {
        match self {
            Fixture::Described {
                home_team: Some(home),
                away_team: Some(away),
                ..
            } => Some(format!("{home} v {away}")),
            _ => None,
        }
    }
}
