//! PriceJudge: classify a listed price against a valuation
//!
//! deviation = (listed − estimate) / estimate, then half-open bands:
//!
//!   [overpriced_from, ∞)             → OVERPRICED
//!   [fair_from, overpriced_from)     → FAIR_PRICE
//!   [fair_low_from, fair_from)       → FAIR_LOW
//!   [good_deal_from, fair_low_from)  → GOOD_DEAL
//!   (−∞, good_deal_from)             → SUSPICIOUSLY_UNDERPRICED

use serde::{Deserialize, Serialize};

use crate::core::codec::parse_decimal_prefix;
use crate::error::{ConfigError, ValuationError};
use crate::types::{Judgment, JudgmentCategory, Valuation, ValuationSource};
use crate::{BAND_FAIR_FROM, BAND_FAIR_LOW_FROM, BAND_GOOD_DEAL_FROM, BAND_OVERPRICED_FROM};

/// Lower edges of the judgment bands
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JudgeBands {
    pub overpriced_from: f64,
    pub fair_from: f64,
    pub fair_low_from: f64,
    pub good_deal_from: f64,
}

impl Default for JudgeBands {
    fn default() -> Self {
        Self {
            overpriced_from: BAND_OVERPRICED_FROM,
            fair_from: BAND_FAIR_FROM,
            fair_low_from: BAND_FAIR_LOW_FROM,
            good_deal_from: BAND_GOOD_DEAL_FROM,
        }
    }
}

impl JudgeBands {
    /// Build validated bands
    pub fn new(
        overpriced_from: f64,
        fair_from: f64,
        fair_low_from: f64,
        good_deal_from: f64,
    ) -> Result<Self, ConfigError> {
        let bands = Self {
            overpriced_from,
            fair_from,
            fair_low_from,
            good_deal_from,
        };
        bands.validate()?;
        Ok(bands)
    }

    /// Edges must be finite and strictly decreasing, and a zero deviation
    /// must land in the fair band.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let edges = [self.overpriced_from, self.fair_from, self.fair_low_from, self.good_deal_from];
        if edges.iter().any(|e| !e.is_finite()) {
            return Err(ConfigError::InvalidBands("edges must be finite".into()));
        }
        if !edges.windows(2).all(|w| w[0] > w[1]) {
            return Err(ConfigError::InvalidBands(format!(
                "edges must be strictly decreasing, got {:?}",
                edges
            )));
        }
        if !(self.fair_from <= 0.0 && self.overpriced_from > 0.0) {
            return Err(ConfigError::InvalidBands(
                "fair band must contain a zero deviation".into(),
            ));
        }
        Ok(())
    }

    /// Map a deviation to exactly one category
    pub fn classify(&self, deviation: f64) -> JudgmentCategory {
        if deviation >= self.overpriced_from {
            JudgmentCategory::Overpriced
        } else if deviation >= self.fair_from {
            JudgmentCategory::FairPrice
        } else if deviation >= self.fair_low_from {
            JudgmentCategory::FairLow
        } else if deviation >= self.good_deal_from {
            JudgmentCategory::GoodDeal
        } else {
            JudgmentCategory::SuspiciouslyUnderpriced
        }
    }
}

/// Validate a listed price: finite and strictly positive
pub fn validate_listed_price(listed_price: f64) -> Result<f64, ValuationError> {
    if listed_price.is_finite() && listed_price > 0.0 {
        Ok(listed_price)
    } else {
        Err(ValuationError::InvalidListedPrice(listed_price.to_string()))
    }
}

/// Parse a listed price typed into a form, then validate it
pub fn parse_listed_price(text: &str) -> Result<f64, ValuationError> {
    let value = parse_decimal_prefix(text)
        .ok_or_else(|| ValuationError::InvalidListedPrice(text.trim().to_string()))?;
    validate_listed_price(value).map_err(|_| ValuationError::InvalidListedPrice(text.trim().to_string()))
}

/// Relative deviation of an observed price from an estimate
pub fn deviation(listed_price: f64, estimate: f64) -> f64 {
    (listed_price - estimate) / estimate
}

/// Classifies listed prices
#[derive(Debug, Clone, Default)]
pub struct PriceJudge {
    bands: JudgeBands,
}

impl PriceJudge {
    /// Judge with the default bands
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bands(bands: JudgeBands) -> Self {
        Self { bands }
    }

    pub fn bands(&self) -> &JudgeBands {
        &self.bands
    }

    /// Judge a listed price against a valuation
    pub fn judge(&self, listed_price: f64, valuation: &Valuation) -> Result<Judgment, ValuationError> {
        let listed_price = validate_listed_price(listed_price)?;
        let estimate = valuation.estimate;
        if !(estimate.is_finite() && estimate > 0.0) {
            return Err(ValuationError::DegenerateEstimate(estimate));
        }

        let deviation = deviation(listed_price, estimate);
        Ok(Judgment {
            category: self.bands.classify(deviation),
            deviation,
            estimate,
            listed_price,
            source: ValuationSource::Baseline,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn valuation(estimate: f64) -> Valuation {
        Valuation {
            estimate,
            factors: Vec::new(),
            source: ValuationSource::Baseline,
            low_confidence: Vec::new(),
        }
    }

    #[test]
    fn test_band_edges_are_closed_below() {
        let bands = JudgeBands::default();
        assert_eq!(bands.classify(0.25), JudgmentCategory::Overpriced);
        assert_eq!(bands.classify(0.2499), JudgmentCategory::FairPrice);
        assert_eq!(bands.classify(0.10), JudgmentCategory::FairPrice);
        assert_eq!(bands.classify(0.0), JudgmentCategory::FairPrice);
        assert_eq!(bands.classify(-0.10), JudgmentCategory::FairPrice);
        assert_eq!(bands.classify(-0.1001), JudgmentCategory::FairLow);
        assert_eq!(bands.classify(-0.25), JudgmentCategory::FairLow);
        assert_eq!(bands.classify(-0.2501), JudgmentCategory::GoodDeal);
        assert_eq!(bands.classify(-0.40), JudgmentCategory::GoodDeal);
        assert_eq!(bands.classify(-0.4001), JudgmentCategory::SuspiciouslyUnderpriced);
        assert_eq!(bands.classify(f64::NEG_INFINITY), JudgmentCategory::SuspiciouslyUnderpriced);
        assert_eq!(bands.classify(f64::INFINITY), JudgmentCategory::Overpriced);
    }

    #[test]
    fn test_round_trip_is_fair() {
        let judge = PriceJudge::new();
        let judgment = judge.judge(268_155.0, &valuation(268_155.0)).unwrap();
        assert_eq!(judgment.category, JudgmentCategory::FairPrice);
        assert_eq!(judgment.deviation, 0.0);
    }

    #[test]
    fn test_invalid_listed_prices() {
        let judge = PriceJudge::new();
        for price in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = judge.judge(price, &valuation(100.0)).unwrap_err();
            assert!(err.is_input_error(), "price {} should be an input error", price);
        }
    }

    #[test]
    fn test_zero_estimate_is_not_an_input_error() {
        let err = PriceJudge::new().judge(100.0, &valuation(0.0)).unwrap_err();
        assert_eq!(err, ValuationError::DegenerateEstimate(0.0));
    }

    #[test]
    fn test_parse_listed_price() {
        assert_eq!(parse_listed_price("250000"), Ok(250000.0));
        assert_eq!(parse_listed_price(" 99.5 ILS"), Ok(99.5));
        assert!(parse_listed_price("abc").is_err());
        assert!(parse_listed_price("0").is_err());
        assert!(parse_listed_price("-5").is_err());
        assert!(parse_listed_price("").is_err());
    }

    #[test]
    fn test_bands_validation() {
        assert!(JudgeBands::new(0.3, -0.05, -0.2, -0.5).is_ok());
        assert!(JudgeBands::new(0.1, 0.2, -0.2, -0.5).is_err());
        assert!(JudgeBands::new(0.3, 0.05, -0.2, -0.5).is_err());
        assert!(JudgeBands::new(0.3, -0.1, -0.1, -0.5).is_err());
        assert!(JudgeBands::new(f64::NAN, -0.1, -0.2, -0.5).is_err());
    }

    #[test]
    fn test_custom_bands_shift_categories() {
        let judge = PriceJudge::with_bands(JudgeBands::new(0.5, -0.2, -0.3, -0.6).unwrap());
        let judgment = judge.judge(140.0, &valuation(100.0)).unwrap();
        assert_eq!(judgment.category, JudgmentCategory::FairPrice);
    }
}
