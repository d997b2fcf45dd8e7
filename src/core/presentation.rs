//! Presentation tables: price formatting, judgment messages and colors
//!
//! Static lookups only. Callers pass the locale explicitly.

use crate::core::valuator::{
    FACTOR_AGE, FACTOR_AREA, FACTOR_CASH, FACTOR_CITY, FACTOR_ELEVATOR, FACTOR_FURNISHED, FACTOR_GARDEN,
    FACTOR_PARKING, FACTOR_ROOMS,
};
use crate::error::ValuationError;
use crate::types::{Factor, JudgmentCategory, Locale};

const ARABIC_INDIC_DIGITS: [char; 10] = ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];
const ARABIC_THOUSANDS_SEPARATOR: char = '٬';

/// Shown in place of a price that is not a finite number
pub const NO_PRICE: &str = "-";

/// Round to a whole unit and group thousands per locale:
/// `268,155` (en-US) or `٢٦٨٬١٥٥` (ar-EG)
pub fn format_price(price: f64, locale: Locale) -> String {
    if !price.is_finite() {
        return NO_PRICE.to_string();
    }
    let rounded = price.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let (separator, arabic) = match locale {
        Locale::En => (',', false),
        Locale::Ar => (ARABIC_THOUSANDS_SEPARATOR, true),
    };

    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 + 1);
    if negative {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        if arabic {
            let d = c.to_digit(10).unwrap_or(0) as usize;
            out.push(ARABIC_INDIC_DIGITS[d]);
        } else {
            out.push(c);
        }
    }
    out
}

/// Signed percentage with two decimals, e.g. `+8.00%`
pub fn format_impact(impact_pct: f64) -> String {
    let sign = if impact_pct >= 0.0 { "+" } else { "" };
    format!("{}{:.2}%", sign, impact_pct)
}

/// Human-readable message for a judgment
pub fn judgment_message(category: JudgmentCategory, locale: Locale) -> &'static str {
    match (locale, category) {
        (Locale::En, JudgmentCategory::Overpriced) => {
            "This appears to be significantly overpriced compared to its expected market range."
        }
        (Locale::En, JudgmentCategory::FairPrice) => "This price is within the fair market range.",
        (Locale::En, JudgmentCategory::GoodDeal) => {
            "This looks like an excellent deal, priced below its typical market range."
        }
        (Locale::En, JudgmentCategory::FairLow) => {
            "This price is a bit low compared to market value — could be fine, but worth double-checking."
        }
        (Locale::En, JudgmentCategory::SuspiciouslyUnderpriced) => {
            "This price is suspiciously low compared to the market range."
        }
        (Locale::Ar, JudgmentCategory::Overpriced) => {
            "يبدو أن السعر مبالغ فيه بشكل كبير مقارنة بالنطاق السوقي المتوقع."
        }
        (Locale::Ar, JudgmentCategory::FairPrice) => "السعر ضمن النطاق العادل للسوق.",
        (Locale::Ar, JudgmentCategory::GoodDeal) => "سعر ممتاز — أقل من المعتاد في السوق ويمثل صفقة جيدة.",
        (Locale::Ar, JudgmentCategory::FairLow) => {
            "السعر أقل قليلاً من القيمة السوقية، قد يكون مقبولاً ولكن يستحق التحقق."
        }
        (Locale::Ar, JudgmentCategory::SuspiciouslyUnderpriced) => {
            "السعر منخفض بشكل مريب مقارنة بالنطاق السوقي."
        }
    }
}

/// Background color for a judgment badge
pub fn judgment_color(category: JudgmentCategory) -> &'static str {
    match category {
        JudgmentCategory::Overpriced => "#d9534f",
        JudgmentCategory::FairPrice => "#f0ad4e",
        JudgmentCategory::FairLow => "#f0ad4e",
        JudgmentCategory::GoodDeal => "#5cb85c",
        JudgmentCategory::SuspiciouslyUnderpriced => "#d9534f",
    }
}

/// Label for a factor name. Names the engine does not know (remote model
/// features) are shown as sent.
pub fn factor_label<'a>(name: &'a str, locale: Locale) -> &'a str {
    let labels: Option<(&'static str, &'static str)> = match name {
        FACTOR_AREA => Some(("Building area", "مساحة البناء")),
        FACTOR_CITY => Some(("City", "المدينة")),
        FACTOR_AGE => Some(("Building age", "عمر البناء")),
        FACTOR_ROOMS => Some(("Rooms", "عدد الغرف")),
        FACTOR_FURNISHED => Some(("Furnished", "مفروشة")),
        FACTOR_PARKING => Some(("Parking", "موقف سيارات")),
        FACTOR_GARDEN => Some(("Garden", "حديقة")),
        FACTOR_ELEVATOR => Some(("Elevator", "مصعد")),
        FACTOR_CASH => Some(("Cash payment", "الدفع نقداً")),
        _ => None,
    };
    match (labels, locale) {
        (Some((en, _)), Locale::En) => en,
        (Some((_, ar)), Locale::Ar) => ar,
        (None, _) => name,
    }
}

/// One breakdown line: label and signed impact, marked when low-confidence
pub fn format_factor(factor: &Factor, locale: Locale) -> String {
    let marker = if factor.low_confidence { " (?)" } else { "" };
    format!("{}: {}{}", factor_label(&factor.name, locale), format_impact(factor.impact_pct), marker)
}

/// Generic notice shown instead of internal error details
pub fn failure_notice(err: &ValuationError, locale: Locale) -> &'static str {
    match (err.is_input_error(), locale) {
        (true, Locale::En) => "Please enter a valid price.",
        (true, Locale::Ar) => "الرجاء إدخال سعر صحيح.",
        (false, Locale::En) => "Could not get analysis.",
        (false, Locale::Ar) => "تعذر الحصول على التحليل.",
    }
}
