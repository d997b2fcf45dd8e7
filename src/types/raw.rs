//! Raw form input, exactly as the user typed it

use serde::{Deserialize, Deserializer, Serialize};

/// Attributes collected from the property form.
///
/// Numeric fields stay textual here: parsing and defaulting belong to the
/// FeatureCodec, which never rejects input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInput {
    /// Building area in m²
    #[serde(default, deserialize_with = "form_text")]
    pub building_area: String,
    /// Building age in years
    #[serde(default, deserialize_with = "form_text")]
    pub building_age: String,
    #[serde(default, deserialize_with = "form_text")]
    pub rooms: String,
    #[serde(default, deserialize_with = "form_text")]
    pub bathrooms: String,
    /// Floor token: a number or one of B / P / GF
    #[serde(default, deserialize_with = "form_text")]
    pub floor: String,
    /// Roof/penthouse checkbox
    #[serde(default)]
    pub roof: bool,
    /// cash / mortgage / installments
    #[serde(default)]
    pub payment_method: String,
    /// Lowercase city tag, e.g. "ramallah"
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub furnished: bool,
    #[serde(default)]
    pub parking: bool,
    /// Sent to the scoring model under the "mortgaged" key
    #[serde(default)]
    pub garden: bool,
    /// Only meaningful when the engine profile has the elevator feature
    #[serde(default)]
    pub elevator: Option<bool>,
}

impl RawInput {
    /// Form with every field blank
    pub fn new() -> Self {
        Self::default()
    }
}

/// Accept either a JSON string or a JSON number for a form field
fn form_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FormText {
        Text(String),
        Number(serde_json::Number),
        Null(()),
    }

    Ok(match FormText::deserialize(deserializer)? {
        FormText::Text(s) => s,
        FormText::Number(n) => n.to_string(),
        FormText::Null(()) => String::new(),
    })
}
