//! HTTP handler for the 7-day dashboard endpoint

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use shared::DashboardResult;

use crate::error::AppError;
use crate::handlers::cache_control;
use crate::services::dashboard;
use crate::AppState;

/// Query parameters for the dashboard endpoint
#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    /// Province to select, by Thai or English name. Optional; the first
    /// province in feed order is used when absent.
    pub province: Option<String>,
}

/// Serve the dashboard envelope.
///
/// Upstream fetch or parse failures surface as a 502 with the failure
/// envelope; a requested province missing from the feed is not an error
/// and comes back as `province: null` inside a 200.
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> Response {
    match state.tmd.fetch_seven_day().await {
        Ok(root) => {
            let payload = dashboard::build(&root, query.province.as_deref());
            (
                StatusCode::OK,
                cache_control(state.config.cache.feed_max_age_secs),
                Json(payload),
            )
                .into_response()
        }
        Err(err) => {
            tracing::error!("forecast feed fetch failed: {}", err);
            let (message, snippet) = feed_failure(err);
            (
                StatusCode::BAD_GATEWAY,
                Json(DashboardResult::failure(message, snippet)),
            )
                .into_response()
        }
    }
}

fn feed_failure(err: AppError) -> (String, Option<String>) {
    match err {
        AppError::FeedUnavailable { message, snippet } => (message, snippet),
        other => (other.to_string(), None),
    }
}
