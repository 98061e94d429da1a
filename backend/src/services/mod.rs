//! Business logic services for the Thai Weather Dashboard

pub mod auth;
pub mod dashboard;
pub mod geocode;
pub mod normalize;
pub mod notify;
pub mod provinces;
pub mod station_pool;

pub use auth::AuthService;
pub use geocode::GeocodeService;
pub use notify::NotifyService;
