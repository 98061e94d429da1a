//! External API integrations

pub mod aws_station;
pub mod line;
pub mod nominatim;
pub mod tmd;
pub mod xml;

pub use aws_station::AwsStationClient;
pub use line::LineClient;
pub use nominatim::NominatimClient;
pub use tmd::TmdClient;
