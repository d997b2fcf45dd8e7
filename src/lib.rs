//! Aqariy: property valuation engine
//!
//! raw form input → FeatureCodec → BaselineValuator → PriceJudge,
//! orchestrated by ValuationFacade with an optional remote scoring model.

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod types;

// =============================================================================
// BASELINE PRICING
// =============================================================================

/// Base price per square metre before any adjustment
pub const BASE_RATE_PER_SQM: f64 = 2000.0;

/// Depreciation per year of building age
pub const AGE_DISCOUNT_PER_YEAR: f64 = 0.02;

/// Depreciation saturates here (reached at 15 years)
pub const AGE_DISCOUNT_CAP: f64 = 0.30;

/// Room premium applies strictly above this count
pub const ROOM_PREMIUM_MIN_ROOMS: u32 = 3;

/// Multiplicative premiums and discounts
pub const ROOM_PREMIUM: f64 = 1.10;
pub const FURNISHED_PREMIUM: f64 = 1.08;
pub const PARKING_PREMIUM: f64 = 1.05;
pub const GARDEN_PREMIUM: f64 = 1.12;
pub const ELEVATOR_PREMIUM: f64 = 1.06;
pub const CASH_DISCOUNT: f64 = 0.95;

/// Largest usable building area (m²). Larger values are treated as unusable
/// input so the priced product stays finite.
pub const MAX_BUILDING_AREA: f64 = 1.0e7;

// =============================================================================
// FLOOR CODES
// =============================================================================

/// Basement ("B")
pub const FLOOR_BASEMENT: i32 = -2;

/// Parlor, half a level below ground ("P")
pub const FLOOR_PARLOR: i32 = -1;

/// Ground floor ("GF"), also the fallback for unparsable tokens
pub const FLOOR_GROUND: i32 = 0;

/// Highest ordinary floor; numeric floors above are clamped here
pub const FLOOR_MAX: i32 = 10;

/// Roof/penthouse tier
pub const FLOOR_ROOF: i32 = 11;

/// Roof flag only overrides floors strictly above this
pub const ROOF_OVERRIDE_MIN_FLOOR: f64 = 2.0;

// =============================================================================
// JUDGMENT BANDS - defaults, overridable through config
// =============================================================================

/// deviation >= this → OVERPRICED
pub const BAND_OVERPRICED_FROM: f64 = 0.25;

/// deviation >= this (and below overpriced) → FAIR_PRICE
pub const BAND_FAIR_FROM: f64 = -0.10;

/// deviation >= this (and below fair) → FAIR_LOW
pub const BAND_FAIR_LOW_FROM: f64 = -0.25;

/// deviation >= this (and below fair-low) → GOOD_DEAL; below → SUSPICIOUSLY_UNDERPRICED
pub const BAND_GOOD_DEAL_FROM: f64 = -0.40;

// =============================================================================
// SCORING COLLABORATOR
// =============================================================================

/// Timeout for a single remote scoring call (milliseconds)
pub const DEFAULT_SCORING_TIMEOUT_MS: u64 = 5000;

pub const DEFAULT_PREDICT_PATH: &str = "/predict";
pub const DEFAULT_JUDGE_PATH: &str = "/judge_price";

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
