//! Thai Weather Dashboard - Backend
//!
//! Proxies the Thai Meteorological Department feeds, Nominatim reverse
//! geocoding, and the LINE gateway, normalizing their response shapes into
//! the stable JSON contracts the dashboard pages consume.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;

pub use config::Config;

use external::{AwsStationClient, LineClient, NominatimClient, TmdClient};
use services::{AuthService, GeocodeService, NotifyService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub tmd: TmdClient,
    pub aws: AwsStationClient,
    pub line: LineClient,
    pub geocode: GeocodeService,
    pub auth: AuthService,
    pub notify: NotifyService,
}

impl AppState {
    /// Wire every client and service from the loaded configuration.
    pub fn new(config: Config) -> Self {
        let tmd = TmdClient::new(
            config.feeds.forecast_url.clone(),
            config.feeds.wind_map_url.clone(),
        );
        let aws = AwsStationClient::new(config.feeds.aws_station_url.clone());
        let line = LineClient::new(
            config.line.channel_id.clone(),
            config.line.channel_secret.clone(),
            config.line.messaging_token.clone(),
        );
        let geocode = GeocodeService::new(NominatimClient::new(
            config.nominatim.base_url.clone(),
            config.nominatim.user_agent.clone(),
        ));
        let auth = AuthService::new(
            line.clone(),
            config.line.redirect_uri.clone(),
            config.session.secret.clone(),
            config.session.expiry_secs,
        );
        let notify = NotifyService::new(line.clone());

        Self {
            config: Arc::new(config),
            tmd,
            aws,
            line,
            geocode,
            auth,
            notify,
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes(state.clone()))
        .nest("/auth", routes::auth_routes(state.clone()))
        // LINE webhook (public - signature-verified inside the handler)
        .route("/webhook/line", post(handlers::handle_line_webhook))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Thai Weather Dashboard API v1.0"
}
