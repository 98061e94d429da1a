//! HTTP handler for the AWS station fan-out endpoint

use axum::{extract::State, response::IntoResponse, Json};
use shared::AwsFanOutResponse;

use crate::handlers::cache_control;
use crate::services::{provinces, station_pool};
use crate::AppState;

/// Fetch station readings for every province and serve the keyed map.
///
/// The aggregate always succeeds at the envelope level; per-province
/// failures are visible as placeholders under their keys.
pub async fn get_aws_stations(State(state): State<AppState>) -> impl IntoResponse {
    let data = station_pool::fetch_all(
        &state.aws,
        &provinces::PROVINCES,
        state.config.feeds.fanout_concurrency,
    )
    .await;

    (
        cache_control(state.config.cache.feed_max_age_secs),
        Json(AwsFanOutResponse::new(data)),
    )
}
