//! Display locales

use serde::{Deserialize, Serialize};

/// The two supported presentation locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English, en-US number grouping
    #[default]
    En,
    /// Arabic, ar-EG digits and grouping
    Ar,
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" => Ok(Locale::En),
            "ar" | "ar-eg" => Ok(Locale::Ar),
            other => Err(format!("unsupported locale '{}', expected en or ar", other)),
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Locale::En => write!(f, "en"),
            Locale::Ar => write!(f, "ar"),
        }
    }
}
