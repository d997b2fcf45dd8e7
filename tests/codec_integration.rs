//! Integration tests for FeatureCodec
//!
//! Normalization is total: every raw form yields a complete feature record,
//! with fallbacks tagged as low-confidence.

use aqariy::config::EngineProfile;
use aqariy::core::codec::resolve_floor;
use aqariy::core::FeatureCodec;
use aqariy::types::{City, FeatureField, PaymentMethod, RawInput};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn form(area: &str, floor: &str, roof: bool) -> RawInput {
    RawInput {
        building_area: area.into(),
        building_age: "10".into(),
        rooms: "3".into(),
        bathrooms: "1".into(),
        floor: floor.into(),
        roof,
        payment_method: "mortgage".into(),
        city: "nablus".into(),
        ..RawInput::default()
    }
}

#[test]
fn test_floor_sentinels() {
    let codec = FeatureCodec::new();
    for (token, expected) in [("B", -2), ("p", -1), ("GF", 0), ("gf", 0), (" B ", -2)] {
        let features = codec.normalize(&form("100", token, false));
        assert_eq!(features.floor.value(), expected, "token {:?}", token);
        assert!(!features.is_low_confidence(FeatureField::Floor));
    }
}

#[test]
fn test_floor_numeric_and_clamped() {
    assert_eq!(resolve_floor("4", false).0.value(), 4);
    assert_eq!(resolve_floor("15", false).0.value(), 10);
    assert_eq!(resolve_floor("-7", false).0.value(), -2);
    assert_eq!(resolve_floor("3rd", false).0.value(), 3);
}

#[test]
fn test_roof_overrides_only_above_second_floor() {
    assert_eq!(resolve_floor("3", true).0.value(), 11);
    assert_eq!(resolve_floor("25", true).0.value(), 11);
    assert_eq!(resolve_floor("2", true).0.value(), 2);
    assert_eq!(resolve_floor("GF", true).0.value(), 0);
    assert_eq!(resolve_floor("B", true).0.value(), -2);
}

#[test]
fn test_unparsable_floor_defaults_to_ground_and_is_flagged() {
    let features = FeatureCodec::new().normalize(&form("100", "top", false));
    assert_eq!(features.floor.value(), 0);
    assert_eq!(features.low_confidence, vec![FeatureField::Floor]);
}

#[test]
fn test_blank_form_still_normalizes() {
    let features = FeatureCodec::new().normalize(&RawInput::new());
    assert_eq!(features.area, 0.0);
    assert_eq!(features.age, 0);
    assert_eq!(features.rooms, 0);
    assert_eq!(features.floor.value(), 0);
    assert_eq!(features.city, City::Other);
    assert_eq!(features.payment_method, PaymentMethod::Cash);
    assert_eq!(
        features.low_confidence,
        vec![
            FeatureField::BuildingArea,
            FeatureField::BuildingAge,
            FeatureField::Rooms,
            FeatureField::Bathrooms,
            FeatureField::Floor,
        ]
    );
}

#[test]
fn test_unknown_payment_is_cash_and_flagged() {
    let mut raw = form("100", "1", false);
    raw.payment_method = "barter".into();
    let features = FeatureCodec::new().normalize(&raw);
    assert_eq!(features.payment_method, PaymentMethod::Cash);
    assert!(features.is_low_confidence(FeatureField::PaymentMethod));
}

#[test]
fn test_unknown_city_uses_other() {
    let mut raw = form("100", "1", false);
    raw.city = "gaza".into();
    let features = FeatureCodec::new().normalize(&raw);
    assert_eq!(features.city, City::Other);
    assert_eq!(features.city.multiplier(), 1.0);
}

#[test]
fn test_elevator_follows_profile() {
    let mut raw = form("100", "1", false);
    raw.elevator = Some(true);

    let with = FeatureCodec::new().normalize(&raw);
    assert_eq!(with.elevator, Some(true));

    let without = FeatureCodec::with_profile(EngineProfile {
        elevator: false,
        judgment: true,
    })
    .normalize(&raw);
    assert_eq!(without.elevator, None);

    raw.elevator = None;
    assert_eq!(FeatureCodec::new().normalize(&raw).elevator, Some(false));
}

#[test]
fn test_raw_input_accepts_numbers_or_text() {
    let raw: RawInput = serde_json::from_str(
        r#"{"buildingArea": 120, "buildingAge": "5", "rooms": 4, "floor": "GF", "city": "hebron"}"#,
    )
    .unwrap();
    let features = FeatureCodec::new().normalize(&raw);
    assert_eq!(features.area, 120.0);
    assert_eq!(features.age, 5);
    assert_eq!(features.rooms, 4);
    assert_eq!(features.floor.value(), 0);
    assert_eq!(features.city, City::Hebron);
}

proptest! {
    #[test]
    fn prop_floor_always_in_range(token in "\\PC{0,12}", roof in any::<bool>()) {
        let (floor, _) = resolve_floor(&token, roof);
        prop_assert!((-2..=11).contains(&floor.value()));
        if !roof {
            prop_assert!(floor.value() <= 10);
        }
    }

    #[test]
    fn prop_normalize_is_total(
        area in "\\PC{0,10}",
        age in "\\PC{0,6}",
        rooms in "\\PC{0,6}",
        floor in "\\PC{0,6}",
        payment in "\\PC{0,12}",
        city in "\\PC{0,12}",
        roof in any::<bool>(),
    ) {
        let raw = RawInput {
            building_area: area,
            building_age: age,
            rooms,
            floor,
            roof,
            payment_method: payment,
            city,
            ..RawInput::default()
        };
        let features = FeatureCodec::new().normalize(&raw);
        prop_assert!(features.area.is_finite() && features.area >= 0.0);
        prop_assert!((-2..=11).contains(&features.floor.value()));
    }
}
