//! Automatic weather station feed client
//!
//! One upstream request per province; the station fan-out service drives
//! this through its worker pool.

use reqwest::Client;
use shared::AwsApiResponse;

use crate::error::{AppError, AppResult};

/// AWS station feed client
#[derive(Clone)]
pub struct AwsStationClient {
    client: Client,
    base_url: String,
}

impl AwsStationClient {
    /// Create a new AwsStationClient
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Fetch the station readings for one province.
    ///
    /// Transport errors and non-2xx statuses are errors here; converting
    /// them into the per-key failure placeholder is the fan-out's concern.
    pub async fn fetch_province(&self, province: &str) -> AppResult<AwsApiResponse> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("province", province)])
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalService(format!(
                    "AWS station request for {} failed: {}",
                    province, e
                ))
            })?;

        if !response.status().is_success() {
            return Err(AppError::ExternalService(format!(
                "AWS station feed returned {} for {}",
                response.status(),
                province
            )));
        }

        response.json().await.map_err(|e| {
            AppError::ExternalService(format!(
                "AWS station feed returned malformed JSON for {}: {}",
                province, e
            ))
        })
    }
}
