//! HTTP handler for the upper-wind map proxy

use axum::{extract::State, response::IntoResponse, Json};

use crate::error::AppResult;
use crate::handlers::cache_control;
use crate::AppState;

/// Proxy the upper-wind map feed as-is.
pub async fn get_wind_map(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let wind_map = state.tmd.fetch_wind_map().await?;
    Ok((
        cache_control(state.config.cache.feed_max_age_secs),
        Json(wind_map),
    ))
}
