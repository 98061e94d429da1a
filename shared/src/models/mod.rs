//! Domain models for the Thai Weather Dashboard

mod forecast;
mod geocode;
mod station;

pub use forecast::*;
pub use geocode::*;
pub use station::*;
