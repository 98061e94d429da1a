//! Route definitions for the Thai Weather Dashboard

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, middleware::session_middleware, AppState};

/// Create API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Dashboard feeds (public, HTTP-cached)
        .route("/forecast", get(handlers::get_dashboard))
        .route("/wind-map", get(handlers::get_wind_map))
        .route("/aws-stations", get(handlers::get_aws_stations))
        // Reverse geocoding (public, HTTP-cached)
        .route("/geocode/province", get(handlers::get_province))
        // Protected routes - notifications
        .nest("/notify", notify_routes(state))
}

/// Authentication routes
pub fn auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // LINE Login (public endpoints)
        .route("/line", get(handlers::get_authorization_url))
        .route("/line/callback", get(handlers::handle_callback))
        .route("/logout", post(handlers::logout))
        // Session-gated endpoints
        .merge(
            Router::new()
                .route("/me", get(handlers::get_me))
                .route_layer(middleware::from_fn_with_state(state, session_middleware)),
        )
}

/// Notification routes (protected)
fn notify_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::send_notification))
        .route_layer(middleware::from_fn_with_state(state, session_middleware))
}
