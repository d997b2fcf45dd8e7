//! Canonical feature record consumed by valuation

use serde::{Deserialize, Serialize};

use crate::{FLOOR_BASEMENT, FLOOR_ROOF, MAX_BUILDING_AREA};

/// Markets known to the scoring model. Anything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum City {
    Jerusalem,
    Ramallah,
    Bethlehem,
    Nablus,
    Hebron,
    Jenin,
    Tulkarem,
    Other,
}

impl City {
    pub const ALL: [City; 8] = [
        City::Jerusalem,
        City::Ramallah,
        City::Bethlehem,
        City::Nablus,
        City::Hebron,
        City::Jenin,
        City::Tulkarem,
        City::Other,
    ];

    /// Resolve a form tag ("ramallah") or a canonical market name ("رام الله").
    /// Unknown tags collapse to `Other`.
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim();
        Self::ALL
            .into_iter()
            .find(|city| tag.eq_ignore_ascii_case(city.tag()) || tag == city.market_name())
            .unwrap_or(City::Other)
    }

    /// Form tag
    pub fn tag(&self) -> &'static str {
        match self {
            City::Jerusalem => "jerusalem",
            City::Ramallah => "ramallah",
            City::Bethlehem => "bethlehem",
            City::Nablus => "nablus",
            City::Hebron => "hebron",
            City::Jenin => "jenin",
            City::Tulkarem => "tulkarem",
            City::Other => "other",
        }
    }

    /// Market name as the scoring model knows it
    pub fn market_name(&self) -> &'static str {
        match self {
            City::Jerusalem => "القدس",
            City::Ramallah => "رام الله",
            City::Bethlehem => "بيت لحم",
            City::Nablus => "نابلس",
            City::Hebron => "الخليل",
            City::Jenin => "جنين",
            City::Tulkarem => "طولكرم",
            City::Other => "أخرى",
        }
    }

    /// Price multiplier relative to the base rate. Markets without a
    /// dedicated multiplier are neutral.
    pub fn multiplier(&self) -> f64 {
        match self {
            City::Jerusalem => 1.3,
            City::Ramallah => 1.1,
            City::Bethlehem => 0.9,
            City::Nablus => 0.8,
            City::Hebron => 0.7,
            City::Jenin | City::Tulkarem | City::Other => 1.0,
        }
    }
}

impl std::fmt::Display for City {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// How the buyer intends to pay. Wire encoding is the discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash = 0,
    Mortgage = 1,
    Installments = 2,
}

impl PaymentMethod {
    /// Known tag, or `None` for anything else
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "cash" => Some(PaymentMethod::Cash),
            "mortgage" => Some(PaymentMethod::Mortgage),
            "installments" => Some(PaymentMethod::Installments),
            _ => None,
        }
    }

    /// Decode the wire integer; unknown codes count as cash
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => PaymentMethod::Mortgage,
            2 => PaymentMethod::Installments,
            _ => PaymentMethod::Cash,
        }
    }

    pub fn code(&self) -> u8 {
        *self as u8
    }
}

/// Resolved floor, always within [-2, 11]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub struct FloorCode(i32);

impl FloorCode {
    /// Clamp any integer into the valid range
    pub fn saturating(value: i32) -> Self {
        Self(value.clamp(FLOOR_BASEMENT, FLOOR_ROOF))
    }

    pub fn value(&self) -> i32 {
        self.0
    }

    pub fn is_roof(&self) -> bool {
        self.0 == FLOOR_ROOF
    }
}

impl Default for FloorCode {
    fn default() -> Self {
        Self(crate::FLOOR_GROUND)
    }
}

impl From<FloorCode> for i32 {
    fn from(code: FloorCode) -> i32 {
        code.0
    }
}

impl TryFrom<i32> for FloorCode {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        if (FLOOR_BASEMENT..=FLOOR_ROOF).contains(&value) {
            Ok(Self(value))
        } else {
            Err(format!("floor {} outside [{}, {}]", value, FLOOR_BASEMENT, FLOOR_ROOF))
        }
    }
}

/// Fields that may fall back to a default during normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureField {
    BuildingArea,
    BuildingAge,
    Rooms,
    Bathrooms,
    Floor,
    PaymentMethod,
}

impl std::fmt::Display for FeatureField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FeatureField::BuildingArea => "building_area",
            FeatureField::BuildingAge => "building_age",
            FeatureField::Rooms => "rooms",
            FeatureField::Bathrooms => "bathrooms",
            FeatureField::Floor => "floor",
            FeatureField::PaymentMethod => "payment_method",
        };
        write!(f, "{}", name)
    }
}

/// Fully-typed property attributes. Every field has a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalFeatures {
    /// m², 0 when unusable
    pub area: f64,
    /// Years
    pub age: u32,
    pub rooms: u32,
    pub bathrooms: u32,
    pub floor: FloorCode,
    pub payment_method: PaymentMethod,
    pub city: City,
    pub furnished: bool,
    pub parking: bool,
    pub garden: bool,
    /// `None` when the engine profile has no elevator feature
    pub elevator: Option<bool>,
    /// Fields whose value is a fallback default rather than parsed input
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub low_confidence: Vec<FeatureField>,
}

impl CanonicalFeatures {
    pub fn is_low_confidence(&self, field: FeatureField) -> bool {
        self.low_confidence.contains(&field)
    }

    /// An area that can be priced: finite, positive, at most `MAX_BUILDING_AREA`
    pub fn usable_area(area: f64) -> Option<f64> {
        (area.is_finite() && area > 0.0 && area <= MAX_BUILDING_AREA).then_some(area)
    }
}
