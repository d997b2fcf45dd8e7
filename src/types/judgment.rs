//! Judgment categories for a listed price

use serde::{Deserialize, Serialize};

use crate::types::ValuationSource;

/// The five judgment categories, ordered from most expensive to cheapest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JudgmentCategory {
    /// Well above the expected market range
    Overpriced,
    /// Within the fair market range
    FairPrice,
    /// A little below market value
    FairLow,
    /// Clearly below market, a good deal
    GoodDeal,
    /// Too far below market to be taken at face value
    SuspiciouslyUnderpriced,
}

impl JudgmentCategory {
    pub const ALL: [JudgmentCategory; 5] = [
        JudgmentCategory::Overpriced,
        JudgmentCategory::FairPrice,
        JudgmentCategory::FairLow,
        JudgmentCategory::GoodDeal,
        JudgmentCategory::SuspiciouslyUnderpriced,
    ];

    /// Wire key, as sent by the judgment collaborator
    pub fn key(&self) -> &'static str {
        match self {
            JudgmentCategory::Overpriced => "OVERPRICED",
            JudgmentCategory::FairPrice => "FAIR_PRICE",
            JudgmentCategory::FairLow => "FAIR_LOW",
            JudgmentCategory::GoodDeal => "GOOD_DEAL",
            JudgmentCategory::SuspiciouslyUnderpriced => "SUSPICIOUSLY_UNDERPRICED",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key.trim())
    }

    /// ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            JudgmentCategory::Overpriced => "\x1b[31m",              // Red
            JudgmentCategory::FairPrice => "\x1b[33m",               // Amber
            JudgmentCategory::FairLow => "\x1b[33m",                 // Amber
            JudgmentCategory::GoodDeal => "\x1b[32m",                // Green
            JudgmentCategory::SuspiciouslyUnderpriced => "\x1b[31m", // Red
        }
    }

    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }
}

impl std::fmt::Display for JudgmentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A judgment plus the numbers that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Judgment {
    pub category: JudgmentCategory,
    /// (listed - estimate) / estimate
    pub deviation: f64,
    pub estimate: f64,
    pub listed_price: f64,
    /// Who classified it: the local judge or the remote collaborator
    pub source: ValuationSource,
}

impl Judgment {
    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "judgment={} | deviation={:+.2}% | estimate={:.0} | listed={:.0} | source={}",
            self.category,
            self.deviation * 100.0,
            self.estimate,
            self.listed_price,
            self.source
        )
    }
}
