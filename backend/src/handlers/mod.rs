//! HTTP handlers for the Thai Weather Dashboard

pub mod auth;
pub mod forecast;
pub mod geocode;
pub mod health;
pub mod line_webhook;
pub mod notify;
pub mod stations;
pub mod wind_map;

pub use auth::{get_authorization_url, get_me, handle_callback, logout};
pub use forecast::get_dashboard;
pub use geocode::get_province;
pub use health::health_check;
pub use line_webhook::handle_line_webhook;
pub use notify::send_notification;
pub use stations::get_aws_stations;
pub use wind_map::get_wind_map;

/// Cache-Control header for a time-boxed revalidation window.
///
/// Responses are cached at the HTTP layer only; nothing in the process
/// holds upstream state between requests.
pub(crate) fn cache_control(max_age_secs: u32) -> [(axum::http::HeaderName, String); 1] {
    [(
        axum::http::header::CACHE_CONTROL,
        format!("public, max-age={}", max_age_secs),
    )]
}
