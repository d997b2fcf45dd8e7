//! FeatureCodec: raw form values → canonical feature record
//!
//! Never fails. Malformed numbers fall back to 0, unknown tags to their
//! documented defaults, and every fallback is recorded as low-confidence.
//!
//! Floor precedence:
//! 1. roof flag with a numeric floor above 2 → 11
//! 2. sentinel token B / P / GF (any case) → -2 / -1 / 0
//! 3. leading integer, clamped to [-2, 10]
//! 4. anything else → 0

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::config::EngineProfile;
use crate::types::{CanonicalFeatures, City, FeatureField, FloorCode, PaymentMethod, RawInput};
use crate::{FLOOR_BASEMENT, FLOOR_GROUND, FLOOR_MAX, FLOOR_PARLOR, FLOOR_ROOF, ROOF_OVERRIDE_MIN_FLOOR};

lazy_static! {
    /// Leading integer, the way a form's integer parse reads "5th" as 5
    static ref RE_INT_PREFIX: Regex = Regex::new(r"^\s*([+-]?\d+)").unwrap();

    /// Leading decimal, the way a form's float parse reads "120m2" as 120
    static ref RE_DECIMAL_PREFIX: Regex = Regex::new(
        r"^\s*([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)"
    ).unwrap();

    /// A token that is a number and nothing else
    static ref RE_NUMBER_STRICT: Regex = Regex::new(
        r"^\s*[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?\s*$"
    ).unwrap();
}

/// Converts raw form input into `CanonicalFeatures`
#[derive(Debug, Clone, Default)]
pub struct FeatureCodec {
    profile: EngineProfile,
}

impl FeatureCodec {
    /// Codec for the default profile (elevator feature enabled)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(profile: EngineProfile) -> Self {
        Self { profile }
    }

    /// Normalize a raw form. Always returns a complete record.
    pub fn normalize(&self, raw: &RawInput) -> CanonicalFeatures {
        let mut low_confidence = Vec::new();

        let area = match parse_decimal_prefix(&raw.building_area).and_then(CanonicalFeatures::usable_area) {
            Some(v) => v,
            None => {
                low_confidence.push(FeatureField::BuildingArea);
                0.0
            }
        };

        let age = count_or_default(&raw.building_age, FeatureField::BuildingAge, &mut low_confidence);
        let rooms = count_or_default(&raw.rooms, FeatureField::Rooms, &mut low_confidence);
        let bathrooms = count_or_default(&raw.bathrooms, FeatureField::Bathrooms, &mut low_confidence);

        let (floor, floor_parsed) = resolve_floor(&raw.floor, raw.roof);
        if !floor_parsed {
            low_confidence.push(FeatureField::Floor);
        }

        let payment_method = match PaymentMethod::from_tag(&raw.payment_method) {
            Some(method) => method,
            None => {
                if !raw.payment_method.trim().is_empty() {
                    low_confidence.push(FeatureField::PaymentMethod);
                }
                PaymentMethod::Cash
            }
        };

        let elevator = if self.profile.elevator {
            Some(raw.elevator.unwrap_or(false))
        } else {
            None
        };

        if !low_confidence.is_empty() {
            debug!(fields = ?low_confidence, "normalization fell back to defaults");
        }

        CanonicalFeatures {
            area,
            age,
            rooms,
            bathrooms,
            floor,
            payment_method,
            city: City::from_tag(&raw.city),
            furnished: raw.furnished,
            parking: raw.parking,
            garden: raw.garden,
            elevator,
            low_confidence,
        }
    }
}

/// Resolve a floor token. The flag is false when the token could not be
/// read and the ground-floor default was used.
pub fn resolve_floor(token: &str, roof: bool) -> (FloorCode, bool) {
    let token = token.trim();

    if roof && parse_number_strict(token).is_some_and(|v| v > ROOF_OVERRIDE_MIN_FLOOR) {
        return (FloorCode::saturating(FLOOR_ROOF), true);
    }

    match token.to_uppercase().as_str() {
        "B" => return (FloorCode::saturating(FLOOR_BASEMENT), true),
        "P" => return (FloorCode::saturating(FLOOR_PARLOR), true),
        "GF" => return (FloorCode::saturating(FLOOR_GROUND), true),
        _ => {}
    }

    match parse_int_prefix(token) {
        Some(v) => {
            let clamped = v.clamp(i64::from(FLOOR_BASEMENT), i64::from(FLOOR_MAX));
            (FloorCode::saturating(clamped as i32), true)
        }
        None => (FloorCode::saturating(FLOOR_GROUND), false),
    }
}

/// Leading integer of `text`, if any
pub fn parse_int_prefix(text: &str) -> Option<i64> {
    let digits = RE_INT_PREFIX.captures(text)?.get(1)?.as_str();
    digits
        .parse::<i64>()
        .ok()
        .or_else(|| digits.parse::<f64>().ok().map(|v| v as i64))
}

/// Leading decimal of `text`, if any
pub fn parse_decimal_prefix(text: &str) -> Option<f64> {
    RE_DECIMAL_PREFIX.captures(text)?.get(1)?.as_str().parse::<f64>().ok()
}

fn parse_number_strict(text: &str) -> Option<f64> {
    if RE_NUMBER_STRICT.is_match(text) {
        text.trim().parse::<f64>().ok()
    } else {
        None
    }
}

/// Non-negative integer count, 0 when missing or negative
fn count_or_default(text: &str, field: FeatureField, low_confidence: &mut Vec<FeatureField>) -> u32 {
    match parse_int_prefix(text) {
        Some(v) if v >= 0 => u32::try_from(v).unwrap_or(u32::MAX),
        _ => {
            low_confidence.push(field);
            0
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
