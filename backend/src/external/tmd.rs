//! Thai Meteorological Department feed client
//!
//! Fetches the 7-day forecast XML feed and the upper-wind map JSON feed.
//! Both are public endpoints reached with plain GETs; responses are handed
//! to callers as loosely-typed `Value` trees because the feeds rename and
//! reshape fields between deployments.

use reqwest::Client;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::external::xml;

/// How much of an upstream body is kept as a diagnostic snippet.
const SNIPPET_CHARS: usize = 200;

/// TMD feed client
#[derive(Clone)]
pub struct TmdClient {
    client: Client,
    forecast_url: String,
    wind_map_url: String,
}

impl TmdClient {
    /// Create a new TmdClient
    pub fn new(forecast_url: String, wind_map_url: String) -> Self {
        Self {
            client: Client::new(),
            forecast_url,
            wind_map_url,
        }
    }

    /// Fetch and parse the 7-day forecast feed.
    ///
    /// The returned tree is whatever the feed contained; locating the
    /// `WeatherForecast7Days` container inside it is the dashboard
    /// builder's job.
    pub async fn fetch_seven_day(&self) -> AppResult<Value> {
        let response = self
            .client
            .get(&self.forecast_url)
            .send()
            .await
            .map_err(|e| AppError::FeedUnavailable {
                message: format!("forecast feed request failed: {}", e),
                snippet: None,
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::FeedUnavailable {
                message: format!("forecast feed returned {}", status),
                snippet: Some(snippet(&body)),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::FeedUnavailable {
                message: format!("failed to read forecast feed body: {}", e),
                snippet: None,
            })?;

        xml::parse_document(&body).map_err(|e| AppError::FeedUnavailable {
            message: format!("forecast feed returned malformed XML: {}", e),
            snippet: Some(snippet(&body)),
        })
    }

    /// Fetch the upper-wind map feed as raw JSON.
    pub async fn fetch_wind_map(&self) -> AppResult<Value> {
        let response = self
            .client
            .get(&self.wind_map_url)
            .send()
            .await
            .map_err(|e| AppError::FeedUnavailable {
                message: format!("wind map feed request failed: {}", e),
                snippet: None,
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::FeedUnavailable {
                message: format!("wind map feed returned {}", status),
                snippet: Some(snippet(&body)),
            });
        }

        response
            .json()
            .await
            .map_err(|e| AppError::FeedUnavailable {
                message: format!("wind map feed returned malformed JSON: {}", e),
                snippet: None,
            })
    }
}

fn snippet(body: &str) -> String {
    body.chars().take(SNIPPET_CHARS).collect()
}
