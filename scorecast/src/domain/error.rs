use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum InvalidScore {
    #[error("score '{0}' should be in the form <home>-<away>")]
    Format(String),

    #[error("goal count out of range in '{0}'")]
    GoalsOutOfRange(String),
}

/// Reason for excluding a raw quotation from the valid set.
#[derive(Debug, Error, PartialEq, Clone)]
pub enum RejectedOdds {
    #[error("missing score")]
    MissingScore,

    #[error("{0}")]
    InvalidScore(#[from] InvalidScore),

    #[error("missing coefficient")]
    MissingCoefficient,

    #[error("unparseable coefficient {0}")]
    UnparseableCoefficient(String),

    #[error("coefficient {0} must be finite and positive")]
    NonPositiveCoefficient(f64),
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("at least {required} valid entries required, got {actual}")]
pub struct InsufficientData {
    pub required: usize,
    pub actual: usize,
}

#[derive(Debug, Error)]
#[error("{0}")]
pub struct ConfigError(#[from] pub anyhow::Error);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_rejected_odds() {
        assert_eq!("missing score", RejectedOdds::MissingScore.to_string());
        assert_eq!(
            "score '2:1' should be in the form <home>-<away>",
            RejectedOdds::from(InvalidScore::Format("2:1".into())).to_string()
        );
        assert_eq!(
            "coefficient -1.5 must be finite and positive",
            RejectedOdds::NonPositiveCoefficient(-1.5).to_string()
        );
    }

    #[test]
    fn display_insufficient_data() {
        assert_eq!(
            "at least 10 valid entries required, got 3",
            InsufficientData { required: 10, actual: 3 }.to_string()
        );
    }
}
