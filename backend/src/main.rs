//! Thai Weather Dashboard - Backend Server
//!
//! Localized weather dashboard for Thailand: proxies the TMD forecast and
//! station feeds, Nominatim reverse geocoding, and LINE login/notifications
//! behind stable JSON contracts.

use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use weather_dashboard_backend::{create_app, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "twd_server=debug,weather_dashboard_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Thai Weather Dashboard Server");
    tracing::info!("Environment: {}", config.environment);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));

    // Create application state and router
    let state = AppState::new(config);
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
