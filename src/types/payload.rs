//! Wire contract of the scoring collaborator
//!
//! Key names are fixed by the trained model's feature columns and must stay
//! byte-exact. Flags travel as 0/1, payment as 0/1/2, city as the market name.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{CanonicalFeatures, City, Factor, FeatureField, FloorCode, PaymentMethod, Valuation};

/// Feature payload for `POST /predict` (and the base of `POST /judge_price`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringPayload {
    #[serde(rename = "عدد_الغرف")]
    pub rooms: u32,
    #[serde(rename = "عدد_الحمامات")]
    pub bathrooms: u32,
    #[serde(rename = "مفروشة")]
    pub furnished: u8,
    #[serde(rename = "مساحة_البناء")]
    pub area: f64,
    #[serde(rename = "الطابق")]
    pub floor: i32,
    #[serde(rename = "عمر_البناء")]
    pub age: u32,
    /// The form's garden checkbox is labelled "property mortgaged" upstream
    #[serde(rename = "العقار_مرهون")]
    pub mortgaged: u8,
    #[serde(rename = "طريقة_الدفع")]
    pub payment_method: u8,
    #[serde(rename = "مصعد", default, skip_serializing_if = "Option::is_none")]
    pub elevator: Option<u8>,
    #[serde(rename = "موقف_سيارات", default)]
    pub parking: u8,
    #[serde(rename = "المدينة")]
    pub city: String,
}

impl From<&CanonicalFeatures> for ScoringPayload {
    fn from(features: &CanonicalFeatures) -> Self {
        Self {
            rooms: features.rooms,
            bathrooms: features.bathrooms,
            furnished: flag(features.furnished),
            area: features.area,
            floor: features.floor.value(),
            age: features.age,
            mortgaged: flag(features.garden),
            payment_method: features.payment_method.code(),
            elevator: features.elevator.map(flag),
            parking: flag(features.parking),
            city: features.city.market_name().to_string(),
        }
    }
}

impl ScoringPayload {
    /// Decode a payload received from another client back into features
    pub fn to_features(&self) -> CanonicalFeatures {
        let area = CanonicalFeatures::usable_area(self.area);
        let low_confidence = if area.is_none() {
            vec![FeatureField::BuildingArea]
        } else {
            Vec::new()
        };
        CanonicalFeatures {
            area: area.unwrap_or(0.0),
            age: self.age,
            rooms: self.rooms,
            bathrooms: self.bathrooms,
            floor: FloorCode::saturating(self.floor),
            payment_method: PaymentMethod::from_code(i64::from(self.payment_method)),
            city: City::from_tag(&self.city),
            furnished: self.furnished != 0,
            parking: self.parking != 0,
            garden: self.mortgaged != 0,
            elevator: self.elevator.map(|e| e != 0),
            low_confidence,
        }
    }
}

fn flag(value: bool) -> u8 {
    u8::from(value)
}

/// Response of `POST /predict`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub predicted_price: f64,
    /// Feature name → signed percentage impact. Older model versions omit it.
    #[serde(default)]
    pub factors: Map<String, Value>,
}

impl ScoreResponse {
    /// Numeric factors in the order the collaborator sent them
    pub fn factor_list(&self) -> Vec<Factor> {
        self.factors
            .iter()
            .filter_map(|(name, impact)| impact.as_f64().map(|pct| Factor::new(name.clone(), pct)))
            .collect()
    }

    pub fn from_valuation(valuation: &Valuation) -> Self {
        let factors = valuation
            .factors
            .iter()
            .filter_map(|f| serde_json::Number::from_f64(f.impact_pct).map(|n| (f.name.clone(), Value::Number(n))))
            .collect();
        Self {
            predicted_price: valuation.estimate,
            factors,
        }
    }
}

/// Request of `POST /judge_price`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgePriceRequest {
    #[serde(flatten)]
    pub features: ScoringPayload,
    pub listed_price: f64,
}

/// Response of `POST /judge_price`. The key stays textual so an unknown
/// category is reported as such rather than as a decode failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgePriceResponse {
    pub judgment_key: String,
}
