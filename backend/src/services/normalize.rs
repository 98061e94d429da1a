//! Normalization of the upstream 7-day forecast payload
//!
//! The forecast feed reaches this module as a loosely-typed `Value` tree
//! whose shape varies with the upstream XML parser's mood: a province's
//! seven days may arrive as an array of per-day objects, or as one object
//! whose fields are parallel co-indexed arrays (a single day collapses the
//! arrays to bare scalars). Field names flip between PascalCase and
//! lowerCamel, and any scalar may be wrapped in a text-node object such as
//! `{"#text": "12.5"}`. This module flattens all of that into
//! [`DailyForecast`] records and never fails: unusable values degrade to
//! `None`, and only a record without a forecast date is dropped entirely.

use serde_json::{Map, Value};
use shared::DailyForecast;

// ============================================================================
// Key alias tables
// ============================================================================

// Candidate accessors per logical field, tried in order; the first key
// present in the record wins.
const FORECAST_DATE_KEYS: &[&str] = &["ForecastDate", "forecastDate"];
const MAX_TEMP_KEYS: &[&str] = &["MaximumTemperature", "maximumTemperature"];
const MIN_TEMP_KEYS: &[&str] = &["MinimumTemperature", "minimumTemperature"];
const WIND_DIRECTION_KEYS: &[&str] = &["WindDirection", "windDirection"];
const WIND_SPEED_KEYS: &[&str] = &["WindSpeed", "windSpeed"];
const RAIN_COVER_KEYS: &[&str] = &["PercentRainCover", "percentRainCover"];
const DESCRIPTION_THAI_KEYS: &[&str] = &["DescriptionThai", "descriptionThai"];
const DESCRIPTION_ENGLISH_KEYS: &[&str] = &["DescriptionEnglish", "descriptionEnglish"];
const TEMP_CATEGORY_THAI_KEYS: &[&str] = &["TemperatureCategoryThai", "temperatureCategoryThai"];
const TEMP_CATEGORY_ENGLISH_KEYS: &[&str] =
    &["TemperatureCategoryEnglish", "temperatureCategoryEnglish"];

/// Every alias group, in record order; used to rebuild per-day records from
/// the co-indexed shape. The first alias of each group is the canonical key.
const FIELD_ALIASES: &[&[&str]] = &[
    FORECAST_DATE_KEYS,
    MAX_TEMP_KEYS,
    MIN_TEMP_KEYS,
    WIND_DIRECTION_KEYS,
    WIND_SPEED_KEYS,
    RAIN_COVER_KEYS,
    DESCRIPTION_THAI_KEYS,
    DESCRIPTION_ENGLISH_KEYS,
    TEMP_CATEGORY_THAI_KEYS,
    TEMP_CATEGORY_ENGLISH_KEYS,
];

/// Wrapper keys an XML parser may leave around a scalar.
const WRAPPER_KEYS: &[&str] = &["#text", "text", "value"];

// ============================================================================
// Normalizer
// ============================================================================

/// Normalize a province's 7-day payload into per-day records.
///
/// Accepts either an array of per-day objects or a single object of
/// co-indexed arrays; anything else yields an empty list. Records whose
/// forecast date resolves to an empty string are dropped; the rest keep
/// their encounter order.
pub fn normalize(raw: &Value) -> Vec<DailyForecast> {
    match raw {
        Value::Array(days) => days.iter().filter_map(normalize_day).collect(),
        Value::Object(fields) => normalize_columns(fields),
        _ => Vec::new(),
    }
}

/// Map one per-day object.
fn normalize_day(day: &Value) -> Option<DailyForecast> {
    let fields = day.as_object()?;

    let forecast_date = coerce_text(pick(fields, FORECAST_DATE_KEYS))
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())?;

    Some(DailyForecast {
        forecast_date,
        max_temp_c: coerce_number(pick(fields, MAX_TEMP_KEYS)),
        min_temp_c: coerce_number(pick(fields, MIN_TEMP_KEYS)),
        wind_direction_deg: coerce_number(pick(fields, WIND_DIRECTION_KEYS)),
        wind_speed_kmh: coerce_number(pick(fields, WIND_SPEED_KEYS)),
        rain_cover_pct: coerce_number(pick(fields, RAIN_COVER_KEYS)),
        description_thai: coerce_text(pick(fields, DESCRIPTION_THAI_KEYS)),
        description_english: coerce_text(pick(fields, DESCRIPTION_ENGLISH_KEYS)),
        temp_category_thai: coerce_text(pick(fields, TEMP_CATEGORY_THAI_KEYS)),
        temp_category_english: coerce_text(pick(fields, TEMP_CATEGORY_ENGLISH_KEYS)),
    })
}

/// Rebuild per-day records from the co-indexed shape, then reuse the
/// per-day mapper so both input shapes normalize identically.
fn normalize_columns(fields: &Map<String, Value>) -> Vec<DailyForecast> {
    let columns: Vec<(&str, Vec<&Value>)> = FIELD_ALIASES
        .iter()
        .map(|aliases| (aliases[0], column(fields, aliases)))
        .collect();

    let rows = columns
        .iter()
        .map(|(_, values)| values.len())
        .max()
        .unwrap_or(0);

    (0..rows)
        .filter_map(|index| {
            let mut row = Map::new();
            for (key, values) in &columns {
                if let Some(value) = values.get(index) {
                    row.insert((*key).to_string(), (*value).clone());
                }
            }
            normalize_day(&Value::Object(row))
        })
        .collect()
}

/// A field as a positional column: an array stays as-is, a present scalar
/// becomes a one-element column, an absent field an empty one.
fn column<'a>(fields: &'a Map<String, Value>, keys: &[&str]) -> Vec<&'a Value> {
    match pick(fields, keys) {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(single) => vec![single],
        None => Vec::new(),
    }
}

/// First defined value among the case-variant keys.
fn pick<'a>(fields: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| fields.get(*key))
}

// ============================================================================
// Scalar coercion
// ============================================================================

/// Strip a text-node wrapper, if any. `{"#text": v}`, `{"text": v}`,
/// `{"value": v}` and a bare scalar all resolve to the same value.
fn unwrap_scalar(value: &Value) -> &Value {
    if let Value::Object(map) = value {
        for key in WRAPPER_KEYS {
            if let Some(inner) = map.get(*key) {
                return inner;
            }
        }
    }
    value
}

/// Coerce a value to a finite number, or `None`. Never fails.
pub fn coerce_number(value: Option<&Value>) -> Option<f64> {
    match unwrap_scalar(value?) {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Coerce a value to text, decoding HTML entities. Never fails.
pub fn coerce_text(value: Option<&Value>) -> Option<String> {
    let text = match unwrap_scalar(value?) {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    Some(decode_entities(&text))
}

/// Decode the HTML entities upstream text is known to carry: the five
/// named ones plus decimal and hex character references. An unrecognized
/// entity is left as literal text.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut decoded = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('&') {
        decoded.push_str(&rest[..start]);
        let tail = &rest[start..];
        match tail.find(';') {
            Some(end) => match decode_entity(&tail[1..end]) {
                Some(ch) => {
                    decoded.push(ch);
                    rest = &tail[end + 1..];
                }
                None => {
                    decoded.push('&');
                    rest = &tail[1..];
                }
            },
            None => {
                decoded.push_str(tail);
                rest = "";
            }
        }
    }
    decoded.push_str(rest);
    decoded
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse::<u32>().ok()?
            };
            char::from_u32(code)
        }
    }
}
