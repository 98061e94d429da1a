//! Seven-day forecast models and the dashboard response envelope

use serde::{Deserialize, Serialize};

/// One day's forecast for one province.
///
/// The forecast date is the only required field; every observation is
/// optional because the upstream feed omits, renames, or text-wraps them
/// freely. Dates arrive as `DD/MM/YYYY` or whatever the feed natively uses
/// and are passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecast {
    pub forecast_date: String,
    pub max_temp_c: Option<f64>,
    pub min_temp_c: Option<f64>,
    pub wind_direction_deg: Option<f64>,
    pub wind_speed_kmh: Option<f64>,
    pub rain_cover_pct: Option<f64>,
    pub description_thai: Option<String>,
    pub description_english: Option<String>,
    pub temp_category_thai: Option<String>,
    pub temp_category_english: Option<String>,
}

/// Forecasts for one province, in feed order.
///
/// The sequence is not re-sorted here; ordering by date is a UI concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvinceForecast {
    pub province_name_thai: String,
    pub province_name_english: String,
    pub seven_days: Vec<DailyForecast>,
}

/// Name pair for the province selection UI, without forecast payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvinceIndexEntry {
    pub province_name_thai: String,
    pub province_name_english: String,
}

/// Envelope returned to the dashboard page.
///
/// Exactly one of the two shapes is serialized; `success` discriminates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DashboardResult {
    Success(DashboardPayload),
    Failure(DashboardFailure),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPayload {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_build_date: Option<String>,
    pub provinces_index: Vec<ProvinceIndexEntry>,
    pub province: Option<ProvinceForecast>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardFailure {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

impl DashboardResult {
    pub fn success(
        last_build_date: Option<String>,
        provinces_index: Vec<ProvinceIndexEntry>,
        province: Option<ProvinceForecast>,
    ) -> Self {
        DashboardResult::Success(DashboardPayload {
            success: true,
            last_build_date,
            provinces_index,
            province,
        })
    }

    pub fn failure(message: impl Into<String>, snippet: Option<String>) -> Self {
        DashboardResult::Failure(DashboardFailure {
            success: false,
            message: message.into(),
            snippet,
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DashboardResult::Success(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_serializes_with_camel_case_wire_names() {
        let result = DashboardResult::success(
            Some("01/01/2026 06:00".to_string()),
            vec![ProvinceIndexEntry {
                province_name_thai: "เชียงใหม่".to_string(),
                province_name_english: "Chiang Mai".to_string(),
            }],
            None,
        );

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["success"], json!(true));
        assert_eq!(value["lastBuildDate"], json!("01/01/2026 06:00"));
        assert_eq!(
            value["provincesIndex"][0]["provinceNameThai"],
            json!("เชียงใหม่")
        );
        assert_eq!(value["province"], json!(null));
    }

    #[test]
    fn absent_optional_fields_are_omitted_not_null() {
        let success = serde_json::to_value(DashboardResult::success(None, vec![], None)).unwrap();
        assert!(success.get("lastBuildDate").is_none());

        let failure =
            serde_json::to_value(DashboardResult::failure("feed returned 503", None)).unwrap();
        assert_eq!(failure["success"], json!(false));
        assert!(failure.get("snippet").is_none());
    }

    #[test]
    fn envelopes_round_trip_through_the_untagged_discriminant() {
        let failure = DashboardResult::failure("upstream timeout", Some("<html>".to_string()));
        let parsed: DashboardResult =
            serde_json::from_value(serde_json::to_value(&failure).unwrap()).unwrap();
        assert!(!parsed.is_success());
        assert_eq!(parsed, failure);
    }
}
