//! Loose conversions for JSON request fields, matching what a document
//! mapper would cast before validating.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use shared_database::bson;

/// Text form of a scalar: numbers in their shortest decimal form
/// (`100` → `"100"`), booleans as `"true"`/`"false"`. `null` has none.
pub fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number_to_text(number)),
        other => Some(other.to_string()),
    }
}

fn number_to_text(number: &serde_json::Number) -> String {
    if let Some(int) = number.as_i64() {
        return int.to_string();
    }
    if let Some(uint) = number.as_u64() {
        return uint.to_string();
    }
    match number.as_f64() {
        Some(float) => float_to_text(float),
        None => number.to_string(),
    }
}

/// Shortest round-trip text, switching to exponent form outside
/// `[1e-6, 1e21)` with an explicit sign (`1e+21`, `1e-7`).
fn float_to_text(float: f64) -> String {
    let magnitude = float.abs();
    if magnitude != 0.0 && !(1e-6..1e21).contains(&magnitude) {
        let formatted = format!("{:e}", float);
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => formatted,
        };
    }
    float.to_string()
}

/// `deserialize_with` helper for optional text fields: any scalar is
/// accepted and cast with [`value_to_text`], `null` or absent is `None`.
/// Pair it with `#[serde(default)]`.
pub fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_text(&value))
}

/// Numbers pass through; numeric strings are parsed. Anything else has no
/// numeric value.
pub fn value_to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) if !text.trim().is_empty() => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Accepts RFC 3339 timestamps, `YYYY-MM-DD` (midnight UTC), naive
/// `YYYY-MM-DDTHH:MM[:SS]` (read as UTC) and epoch milliseconds.
pub fn value_to_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(text) => parse_date(text),
        Value::Number(number) => number
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        _ => None,
    }
}

pub fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

pub fn to_bson_date(date: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(date.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use serde_json::json;

    #[test]
    fn test_value_to_text() {
        assert_eq!(value_to_text(&json!(100)), Some("100".to_string()));
        assert_eq!(value_to_text(&json!(99.5)), Some("99.5".to_string()));
        assert_eq!(value_to_text(&json!(100.0)), Some("100".to_string()));
        assert_eq!(value_to_text(&json!("250")), Some("250".to_string()));
        assert_eq!(value_to_text(&json!(true)), Some("true".to_string()));
        assert_eq!(value_to_text(&Value::Null), None);
    }

    #[test]
    fn test_value_to_text_exponent_range() {
        assert_eq!(value_to_text(&json!(1e21)), Some("1e+21".to_string()));
        assert_eq!(value_to_text(&json!(1.5e22)), Some("1.5e+22".to_string()));
        assert_eq!(value_to_text(&json!(1e20)), Some("100000000000000000000".to_string()));
        assert_eq!(value_to_text(&json!(0.0000001)), Some("1e-7".to_string()));
        assert_eq!(value_to_text(&json!(0.000001)), Some("0.000001".to_string()));
        assert_eq!(value_to_text(&json!(-2.5e21)), Some("-2.5e+21".to_string()));
    }

    #[derive(Debug, Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "loose_text")]
        phone: Option<String>,
        #[serde(default, deserialize_with = "loose_text")]
        bio: Option<String>,
    }

    #[test]
    fn test_loose_text_casts_scalars() {
        let form: Form = serde_json::from_value(json!({ "phone": 5550123, "bio": false })).unwrap();
        assert_eq!(form.phone.as_deref(), Some("5550123"));
        assert_eq!(form.bio.as_deref(), Some("false"));

        let empty: Form = serde_json::from_value(json!({ "phone": null })).unwrap();
        assert!(empty.phone.is_none());
        assert!(empty.bio.is_none());
    }

    #[test]
    fn test_value_to_number() {
        assert_eq!(value_to_number(&json!(120)), Some(120.0));
        assert_eq!(value_to_number(&json!(" 75.5 ")), Some(75.5));
        assert_eq!(value_to_number(&json!("cheap")), None);
        assert_eq!(value_to_number(&json!("")), None);
        assert_eq!(value_to_number(&Value::Null), None);
    }

    #[test]
    fn test_parse_date_formats() {
        let plain = parse_date("2024-05-01").unwrap();
        assert_eq!((plain.year(), plain.month(), plain.day()), (2024, 5, 1));

        let rfc = parse_date("2024-05-01T09:30:00+02:00").unwrap();
        assert_eq!(rfc.to_rfc3339(), "2024-05-01T07:30:00+00:00");

        let local = parse_date("2024-05-01T09:30").unwrap();
        assert_eq!(local.to_rfc3339(), "2024-05-01T09:30:00+00:00");

        assert!(parse_date("next tuesday").is_none());
        assert!(parse_date("2024-13-40").is_none());
    }

    #[test]
    fn test_value_to_date_from_millis() {
        let date = value_to_date(&json!(0)).unwrap();
        assert_eq!(date.year(), 1970);
        assert!(value_to_date(&json!(false)).is_none());
    }

    #[test]
    fn test_to_bson_date_keeps_millis() {
        let date = parse_date("2024-05-01").unwrap();
        assert_eq!(to_bson_date(date).timestamp_millis(), date.timestamp_millis());
    }
}
