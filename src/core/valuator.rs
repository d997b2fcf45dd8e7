//! BaselineValuator: deterministic, explainable fallback pricing
//!
//! price = area × 2000 × city multiplier
//!       × (1 − min(age × 0.02, 0.30))
//!       × 1.10 if rooms > 3
//!       × amenity premiums (furnished, parking, garden, elevator)
//!       × 0.95 for cash
//! rounded to a whole currency unit.

use crate::types::{CanonicalFeatures, Factor, FeatureField, PaymentMethod, Valuation, ValuationSource};
use crate::{
    AGE_DISCOUNT_CAP, AGE_DISCOUNT_PER_YEAR, BASE_RATE_PER_SQM, CASH_DISCOUNT, ELEVATOR_PREMIUM,
    FURNISHED_PREMIUM, GARDEN_PREMIUM, PARKING_PREMIUM, ROOM_PREMIUM, ROOM_PREMIUM_MIN_ROOMS,
};

/// Factor names in the breakdown
pub const FACTOR_AREA: &str = "building_area";
pub const FACTOR_CITY: &str = "city_market";
pub const FACTOR_AGE: &str = "building_age";
pub const FACTOR_ROOMS: &str = "rooms";
pub const FACTOR_FURNISHED: &str = "furnished";
pub const FACTOR_PARKING: &str = "parking";
pub const FACTOR_GARDEN: &str = "garden";
pub const FACTOR_ELEVATOR: &str = "elevator";
pub const FACTOR_CASH: &str = "cash_payment";

/// Age depreciation, linear and saturating at 30%
pub fn age_discount(age: u32) -> f64 {
    (f64::from(age) * AGE_DISCOUNT_PER_YEAR).min(AGE_DISCOUNT_CAP)
}

/// Local pricing model
#[derive(Debug, Default, Clone, Copy)]
pub struct BaselineValuator;

impl BaselineValuator {
    pub fn new() -> Self {
        Self
    }

    /// Estimate a price. Pure: identical input gives bit-identical output.
    pub fn estimate(&self, features: &CanonicalFeatures) -> Valuation {
        let city_multiplier = features.city.multiplier();
        let mut price = features.area * BASE_RATE_PER_SQM * city_multiplier;

        let mut factors = Vec::new();
        if features.is_low_confidence(FeatureField::BuildingArea) {
            factors.push(Factor::new(FACTOR_AREA, 0.0).flagged(true));
        }
        if city_multiplier != 1.0 {
            factors.push(Factor::from_multiplier(FACTOR_CITY, city_multiplier));
        }

        // Applied in this order; the order is irrelevant mathematically but
        // fixed so the floating-point result is reproducible.
        let steps = [
            (
                FACTOR_AGE,
                1.0 - age_discount(features.age),
                features.is_low_confidence(FeatureField::BuildingAge),
            ),
            (
                FACTOR_ROOMS,
                if features.rooms > ROOM_PREMIUM_MIN_ROOMS { ROOM_PREMIUM } else { 1.0 },
                features.is_low_confidence(FeatureField::Rooms),
            ),
            (FACTOR_FURNISHED, premium(features.furnished, FURNISHED_PREMIUM), false),
            (FACTOR_PARKING, premium(features.parking, PARKING_PREMIUM), false),
            (FACTOR_GARDEN, premium(features.garden, GARDEN_PREMIUM), false),
            (FACTOR_ELEVATOR, premium(features.elevator == Some(true), ELEVATOR_PREMIUM), false),
            (
                FACTOR_CASH,
                premium(features.payment_method == PaymentMethod::Cash, CASH_DISCOUNT),
                features.is_low_confidence(FeatureField::PaymentMethod),
            ),
        ];

        for (name, multiplier, low_confidence) in steps {
            price *= multiplier;
            if multiplier != 1.0 || low_confidence {
                factors.push(Factor::from_multiplier(name, multiplier).flagged(low_confidence));
            }
        }

        // Features built by hand can bypass the codec's area bound
        if !price.is_finite() {
            price = 0.0;
        }

        Valuation {
            estimate: price.round(),
            factors,
            source: ValuationSource::Baseline,
            low_confidence: features.low_confidence.clone(),
        }
    }
}

fn premium(applies: bool, multiplier: f64) -> f64 {
    if applies {
        multiplier
    } else {
        1.0
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{City, FloorCode};

    fn features() -> CanonicalFeatures {
        CanonicalFeatures {
            area: 120.0,
            age: 5,
            rooms: 4,
            bathrooms: 2,
            floor: FloorCode::saturating(1),
            payment_method: PaymentMethod::Cash,
            city: City::Ramallah,
            furnished: true,
            parking: false,
            garden: false,
            elevator: None,
            low_confidence: Vec::new(),
        }
    }

    #[test]
    fn test_reference_example() {
        let valuation = BaselineValuator::new().estimate(&features());
        assert_eq!(valuation.estimate, 268_155.0);
        assert_eq!(valuation.source, ValuationSource::Baseline);
    }

    #[test]
    fn test_factor_breakdown_in_step_order() {
        let valuation = BaselineValuator::new().estimate(&features());
        let factors: Vec<(&str, f64)> = valuation
            .factors
            .iter()
            .map(|f| (f.name.as_str(), f.impact_pct))
            .collect();
        assert_eq!(
            factors,
            vec![
                (FACTOR_CITY, 10.0),
                (FACTOR_AGE, -10.0),
                (FACTOR_ROOMS, 10.0),
                (FACTOR_FURNISHED, 8.0),
                (FACTOR_CASH, -5.0),
            ]
        );
    }

    #[test]
    fn test_age_discount_saturates() {
        assert_eq!(age_discount(0), 0.0);
        assert!((age_discount(10) - 0.20).abs() < 1e-12);
        assert_eq!(age_discount(15), 0.30);
        assert_eq!(age_discount(80), 0.30);
    }

    #[test]
    fn test_three_rooms_no_premium() {
        let mut f = features();
        f.rooms = 3;
        let valuation = BaselineValuator::new().estimate(&f);
        assert!(valuation.factor(FACTOR_ROOMS).is_none());
    }

    #[test]
    fn test_all_amenities() {
        let mut f = features();
        f.city = City::Other;
        f.age = 0;
        f.rooms = 2;
        f.parking = true;
        f.garden = true;
        f.elevator = Some(true);
        f.payment_method = PaymentMethod::Mortgage;
        // 100 m² for round numbers
        f.area = 100.0;
        let valuation = BaselineValuator::new().estimate(&f);
        let expected = (100.0 * 2000.0 * 1.08 * 1.05 * 1.12 * 1.06_f64).round();
        assert_eq!(valuation.estimate, expected);
        assert!(valuation.factor(FACTOR_CASH).is_none());
        assert_eq!(valuation.factor(FACTOR_ELEVATOR).unwrap().impact_pct, 6.0);
    }

    #[test]
    fn test_low_confidence_age_is_reported_even_when_neutral() {
        let mut f = features();
        f.age = 0;
        f.low_confidence = vec![FeatureField::BuildingAge];
        let valuation = BaselineValuator::new().estimate(&f);
        let age = valuation.factor(FACTOR_AGE).unwrap();
        assert_eq!(age.impact_pct, 0.0);
        assert!(age.low_confidence);
        assert!(valuation.is_low_confidence());
    }

    #[test]
    fn test_determinism() {
        let valuator = BaselineValuator::new();
        let a = valuator.estimate(&features());
        let b = valuator.estimate(&features());
        assert_eq!(a.estimate.to_bits(), b.estimate.to_bits());
        assert_eq!(a, b);
    }

    #[test]
    fn test_unbounded_area_never_yields_non_finite_estimate() {
        let mut f = features();
        f.area = 1e306;
        let valuation = BaselineValuator::new().estimate(&f);
        assert_eq!(valuation.estimate, 0.0);
    }
}
