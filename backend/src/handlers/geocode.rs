//! HTTP handler for reverse geocoding

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use shared::ProvinceLookupResult;

use crate::handlers::cache_control;
use crate::AppState;

/// Query parameters for the province lookup
#[derive(Debug, Deserialize)]
pub struct GeocodeQuery {
    pub lat: f64,
    pub lon: f64,
}

/// Resolve coordinates to a Thai province name.
pub async fn get_province(
    State(state): State<AppState>,
    Query(query): Query<GeocodeQuery>,
) -> Response {
    match state.geocode.resolve_province(query.lat, query.lon).await {
        Ok(Some(province)) => (
            StatusCode::OK,
            cache_control(state.config.cache.geocode_max_age_secs),
            Json(ProvinceLookupResult::success(province)),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ProvinceLookupResult::failure(
                "no province at the given coordinates",
            )),
        )
            .into_response(),
        Err(err) => {
            tracing::error!("reverse geocode failed: {}", err);
            (
                StatusCode::BAD_GATEWAY,
                Json(ProvinceLookupResult::failure(err.to_string())),
            )
                .into_response()
        }
    }
}
