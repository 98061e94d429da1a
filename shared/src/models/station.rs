//! Automatic weather station (AWS) models
//!
//! The per-province station feed is consumed defensively: every field is
//! optional and unknown keys are ignored, so a renamed upstream field
//! degrades to `null` instead of a deserialization error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One station snapshot for one province.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AwsStationReading {
    pub station_id: Option<String>,
    pub station_name_thai: Option<String>,
    pub station_name_english: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub region_id: Option<String>,
    pub region_name_thai: Option<String>,
    pub temperature_c: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub wind_direction_deg: Option<f64>,
    pub wind_speed_kmh: Option<f64>,
    pub rain_15_min_mm: Option<f64>,
    pub rain_today_mm: Option<f64>,
    pub rain_yesterday_mm: Option<f64>,
    pub pressure_hpa: Option<f64>,
    pub weather_type_code: Option<String>,
    pub temp_type_code: Option<String>,
    pub wave_type_code: Option<String>,
    pub observed_at: Option<String>,
}

/// Upstream response for one province, or the failure placeholder that
/// stands in for it when that province's request failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsApiResponse {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub data: Vec<AwsStationReading>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn default_success() -> bool {
    true
}

impl AwsApiResponse {
    /// Placeholder recorded for a province whose upstream call failed.
    pub fn failure(message: impl Into<String>) -> Self {
        AwsApiResponse {
            success: false,
            data: Vec::new(),
            message: Some(message.into()),
        }
    }
}

/// Aggregate fan-out envelope: one entry per province in the fixed set,
/// present exactly once whether its request succeeded or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsFanOutResponse {
    pub success: bool,
    pub count: usize,
    pub data: BTreeMap<String, AwsApiResponse>,
}

impl AwsFanOutResponse {
    pub fn new(data: BTreeMap<String, AwsApiResponse>) -> Self {
        AwsFanOutResponse {
            success: true,
            count: data.len(),
            data,
        }
    }
}
