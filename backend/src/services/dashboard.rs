//! Dashboard response builder
//!
//! Consumes the parsed 7-day feed and assembles the envelope the dashboard
//! page renders: a province index for the selection UI plus at most one
//! province's full forecast. This is a pure transform; it never fails.
//! Upstream fetch and parse failures are reported by the route handler as
//! a separate failure envelope, not from here.

use serde_json::{Map, Value};
use shared::{DashboardResult, ProvinceForecast, ProvinceIndexEntry};

use crate::services::normalize::{self, coerce_text};

const ROOT_KEYS: &[&str] = &["WeatherForecast7Days", "weatherForecast7Days"];
const HEADER_KEYS: &[&str] = &["Header", "header"];
const LAST_BUILD_KEYS: &[&str] = &["LastBuildDate", "lastBuildDate"];
const PROVINCES_KEYS: &[&str] = &["Provinces", "provinces"];
const PROVINCE_KEYS: &[&str] = &["Province", "province"];
const NAME_THAI_KEYS: &[&str] = &["ProvinceNameThai", "provinceNameThai"];
const NAME_ENGLISH_KEYS: &[&str] = &["ProvinceNameEnglish", "provinceNameEnglish"];
const SEVEN_DAY_KEYS: &[&str] = &[
    "SevenDaysForecast",
    "sevenDaysForecast",
    "SevenDaysForecasts",
    "sevenDaysForecasts",
];

/// Thai honorific prefixed to province names in URLs and user input.
const PROVINCE_HONORIFIC: &str = "จังหวัด";

/// Build the dashboard envelope from a parsed feed.
///
/// `requested` selects a province by Thai or English name, compared by
/// normalized key (exact fold match only — no substring matching). A miss
/// yields `province: null`; whether that is a 404 is the caller's call.
/// With no request, the first province in feed order is selected.
pub fn build(root: &Value, requested: Option<&str>) -> DashboardResult {
    let container = locate_container(root);
    let last_build_date = last_build_date(container);

    let provinces: Vec<ProvinceForecast> = province_nodes(container)
        .into_iter()
        .filter_map(province_forecast)
        .collect();

    let provinces_index = provinces
        .iter()
        .map(|p| ProvinceIndexEntry {
            province_name_thai: p.province_name_thai.clone(),
            province_name_english: p.province_name_english.clone(),
        })
        .collect();

    let province = match requested {
        Some(name) => {
            let key = normalize_province_key(name);
            provinces
                .iter()
                .find(|p| {
                    normalize_province_key(&p.province_name_thai) == key
                        || normalize_province_key(&p.province_name_english) == key
                })
                .cloned()
        }
        None => provinces.first().cloned(),
    };

    DashboardResult::success(last_build_date, provinces_index, province)
}

/// Case/whitespace/honorific-insensitive key for province matching.
pub fn normalize_province_key(name: &str) -> String {
    let trimmed = name.trim();
    let stripped = trimmed.strip_prefix(PROVINCE_HONORIFIC).unwrap_or(trimmed);
    stripped
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// The feed root, or the whole input when no known container key matches.
fn locate_container(root: &Value) -> &Value {
    root.as_object()
        .and_then(|obj| pick(obj, ROOT_KEYS))
        .unwrap_or(root)
}

/// Optional feed build timestamp: tried directly on the container, then
/// under its header element.
fn last_build_date(container: &Value) -> Option<String> {
    let obj = container.as_object()?;
    coerce_text(pick(obj, LAST_BUILD_KEYS)).or_else(|| {
        let header = pick(obj, HEADER_KEYS)?.as_object()?;
        coerce_text(pick(header, LAST_BUILD_KEYS))
    })
}

/// The province list, with a single object coerced to a one-element list.
/// Paths are tried in order; the first non-empty result wins.
fn province_nodes(container: &Value) -> Vec<&Value> {
    let Some(obj) = container.as_object() else {
        return Vec::new();
    };

    for key in PROVINCES_KEYS {
        let Some(node) = obj.get(*key) else { continue };
        let list: Vec<&Value> = match node {
            Value::Array(items) => items.iter().collect(),
            Value::Object(inner) => match pick(inner, PROVINCE_KEYS) {
                Some(Value::Array(items)) => items.iter().collect(),
                Some(single @ Value::Object(_)) => vec![single],
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };
        if !list.is_empty() {
            return list;
        }
    }
    Vec::new()
}

/// One province entry: names plus its normalized 7-day payload. An entry
/// without either name is dropped.
fn province_forecast(node: &Value) -> Option<ProvinceForecast> {
    let fields = node.as_object()?;

    let province_name_thai = coerce_text(pick(fields, NAME_THAI_KEYS)).unwrap_or_default();
    let province_name_english = coerce_text(pick(fields, NAME_ENGLISH_KEYS)).unwrap_or_default();
    if province_name_thai.is_empty() && province_name_english.is_empty() {
        return None;
    }

    let seven_days = pick(fields, SEVEN_DAY_KEYS)
        .map(normalize::normalize)
        .unwrap_or_default();

    Some(ProvinceForecast {
        province_name_thai,
        province_name_english,
        seven_days,
    })
}

fn pick<'a>(fields: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| fields.get(*key))
}
