//! Core types for Aqariy

mod raw;
mod features;
mod valuation;
mod judgment;
mod payload;
mod locale;

pub use raw::RawInput;
pub use features::{CanonicalFeatures, City, FeatureField, FloorCode, PaymentMethod};
pub use valuation::{Factor, Valuation, ValuationSource};
pub use judgment::{Judgment, JudgmentCategory};
pub use payload::{JudgePriceRequest, JudgePriceResponse, ScoreResponse, ScoringPayload};
pub use locale::Locale;
