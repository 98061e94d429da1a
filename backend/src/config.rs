//! Configuration management for the Thai Weather Dashboard
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with TWD_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Upstream feed endpoints
    pub feeds: FeedConfig,

    /// Nominatim reverse-geocoding configuration
    pub nominatim: NominatimConfig,

    /// LINE login / messaging configuration
    pub line: LineConfig,

    /// Session cookie configuration
    pub session: SessionConfig,

    /// HTTP cache windows, in seconds
    pub cache: CacheConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeedConfig {
    /// TMD 7-day forecast feed (XML)
    pub forecast_url: String,

    /// TMD upper-wind map feed (JSON)
    pub wind_map_url: String,

    /// TMD automatic weather station feed, queried per province (JSON)
    pub aws_station_url: String,

    /// Worker-pool size for the per-province station fan-out
    pub fanout_concurrency: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NominatimConfig {
    /// Nominatim base URL
    pub base_url: String,

    /// User-Agent sent with every request, per Nominatim usage policy
    pub user_agent: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LineConfig {
    /// LINE Channel ID
    pub channel_id: String,

    /// LINE Channel Secret
    pub channel_secret: String,

    /// LINE Messaging API access token
    pub messaging_token: String,

    /// Redirect URI registered for LINE Login
    pub redirect_uri: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Secret key for signing session tokens
    pub secret: String,

    /// Session cookie name
    pub cookie_name: String,

    /// Session expiration in seconds
    pub expiry_secs: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    /// Revalidation window for forecast / wind-map / station responses
    pub feed_max_age_secs: u32,

    /// Revalidation window for reverse-geocoding responses
    pub geocode_max_age_secs: u32,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("TWD_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default(
                "feeds.forecast_url",
                "https://data.tmd.go.th/api/WeatherForecast7Days/v1/?type=xml",
            )?
            .set_default(
                "feeds.wind_map_url",
                "https://data.tmd.go.th/api/UpperWindMap/v1/?type=json",
            )?
            .set_default(
                "feeds.aws_station_url",
                "https://data.tmd.go.th/api/WeatherToday/v1/aws",
            )?
            .set_default("feeds.fanout_concurrency", 8)?
            .set_default("nominatim.base_url", "https://nominatim.openstreetmap.org")?
            .set_default("nominatim.user_agent", "thai-weather-dashboard/0.1")?
            .set_default("line.channel_id", "")?
            .set_default("line.channel_secret", "")?
            .set_default("line.messaging_token", "")?
            .set_default(
                "line.redirect_uri",
                "http://localhost:3000/auth/line/callback",
            )?
            .set_default("session.secret", "development-secret-key")?
            .set_default("session.cookie_name", "twd_session")?
            .set_default("session.expiry_secs", 604800)?
            .set_default("cache.feed_max_age_secs", 300)?
            .set_default("cache.geocode_max_age_secs", 86400)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (TWD_ prefix)
            .add_source(
                Environment::with_prefix("TWD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}
