//! Error types
//!
//! Normalization never fails, so there is no codec error. What remains is
//! listed-price validation, collaborator failures and configuration.

use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by the valuation facade and the price judge
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValuationError {
    /// Listed price is non-numeric, non-finite, zero or negative
    #[error("invalid listed price: {0}")]
    InvalidListedPrice(String),

    /// Estimate cannot anchor a deviation (zero area, broken remote score)
    #[error("estimate {0} cannot be used to judge a price")]
    DegenerateEstimate(f64),

    /// Engine profile was built without the judgment capability
    #[error("price judgment is not enabled for this engine profile")]
    JudgmentDisabled,
}

impl ValuationError {
    /// Caused by what the user typed, as opposed to a computation failure
    pub fn is_input_error(&self) -> bool {
        matches!(self, ValuationError::InvalidListedPrice(_))
    }
}

/// Errors talking to the remote scoring collaborator. Always recoverable:
/// the facade falls back to the baseline.
#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("scoring service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("no response within {0:?}")]
    Timeout(Duration),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("unknown judgment key '{0}'")]
    UnknownJudgment(String),
}

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("invalid judgment bands: {0}")]
    InvalidBands(String),

    #[error("scoring timeout must be greater than zero")]
    InvalidTimeout,

    #[error("invalid scoring base url '{0}'")]
    InvalidBaseUrl(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Load(Box::new(err))
    }
}
