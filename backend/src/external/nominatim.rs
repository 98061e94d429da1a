//! OpenStreetMap Nominatim reverse-geocoding client

use reqwest::Client;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Nominatim client
#[derive(Clone)]
pub struct NominatimClient {
    client: Client,
    base_url: String,
    user_agent: String,
}

/// Reverse-geocoding response, reduced to the fields the dashboard uses.
#[derive(Debug, Deserialize)]
pub struct NominatimResponse {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub address: NominatimAddress,
}

/// Nominatim's address object names the province-level unit differently
/// depending on the locale and zoom; both candidates are kept.
#[derive(Debug, Default, Deserialize)]
pub struct NominatimAddress {
    pub province: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
}

impl NominatimClient {
    /// Create a new NominatimClient
    pub fn new(base_url: String, user_agent: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            user_agent,
        }
    }

    /// Reverse geocode a coordinate pair, asking for Thai names.
    pub async fn reverse(&self, latitude: f64, longitude: f64) -> AppResult<NominatimResponse> {
        let url = format!("{}/reverse", self.base_url);
        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .query(&[
                ("format", "jsonv2"),
                ("accept-language", "th"),
                ("lat", &latitude.to_string()),
                ("lon", &longitude.to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::GeocodeError(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::GeocodeError(format!(
                "Nominatim returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::GeocodeError(format!("malformed response: {}", e)))
    }
}
