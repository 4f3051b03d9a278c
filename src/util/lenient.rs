//! Serde helpers for form-style JSON payloads.
//!
//! The frontend posts numeric fields either as JSON numbers or as the raw
//! text of an input box, and leaves untouched inputs as `""` or `null`.

use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

/// Accepts a JSON number or a numeric string. Blank strings and `null` decode to `None`.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Option::<NumberOrText>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(NumberOrText::Number(n)) => return Ok(Some(n)),
        Some(NumberOrText::Text(text)) => text,
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    // f64::from_str also takes "NaN" and "inf", which are not amounts.
    match trimmed.replace(',', ".").parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(Some(n)),
        _ => Err(de::Error::custom(format!("invalid number: {:?}", text))),
    }
}

/// Trims strings and maps blank or `null` values to `None`.
pub fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}
