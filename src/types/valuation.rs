//! Valuation result and its explainability breakdown

use serde::{Deserialize, Serialize};

use crate::types::FeatureField;

/// Where an estimate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuationSource {
    /// Local deterministic model
    Baseline,
    /// Remote trained model
    Remote,
}

impl std::fmt::Display for ValuationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValuationSource::Baseline => write!(f, "baseline"),
            ValuationSource::Remote => write!(f, "remote"),
        }
    }
}

/// One contributing factor of an estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factor {
    pub name: String,
    /// Signed percentage, e.g. 8.0 for a +8% premium
    pub impact_pct: f64,
    /// Derived from a field that fell back to a default
    #[serde(default)]
    pub low_confidence: bool,
}

impl Factor {
    pub fn new(name: impl Into<String>, impact_pct: f64) -> Self {
        Self {
            name: name.into(),
            impact_pct,
            low_confidence: false,
        }
    }

    /// Percentage impact of a multiplicative adjustment, two decimals
    pub fn from_multiplier(name: impl Into<String>, multiplier: f64) -> Self {
        Self::new(name, ((multiplier - 1.0) * 10_000.0).round() / 100.0)
    }

    pub fn flagged(mut self, low_confidence: bool) -> Self {
        self.low_confidence = low_confidence;
        self
    }
}

/// An estimated price plus the ordered factors that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    pub estimate: f64,
    pub factors: Vec<Factor>,
    pub source: ValuationSource,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub low_confidence: Vec<FeatureField>,
}

impl Valuation {
    pub fn factor(&self, name: &str) -> Option<&Factor> {
        self.factors.iter().find(|f| f.name == name)
    }

    pub fn is_low_confidence(&self) -> bool {
        !self.low_confidence.is_empty()
    }
}
