//! Province resolution from GPS coordinates
//!
//! Wraps the Nominatim client and reduces its address object to the one
//! thing the dashboard needs: which Thai province the user is standing in.

use crate::error::AppResult;
use crate::external::nominatim::{NominatimAddress, NominatimClient};

/// Thai honorific Nominatim prepends to province names.
const PROVINCE_HONORIFIC: &str = "จังหวัด";

/// Reverse-geocoding service
#[derive(Clone)]
pub struct GeocodeService {
    client: NominatimClient,
}

impl GeocodeService {
    /// Create a new GeocodeService
    pub fn new(client: NominatimClient) -> Self {
        Self { client }
    }

    /// Resolve coordinates to a Thai province name.
    ///
    /// `Ok(None)` means the lookup succeeded but named no province-level
    /// unit; whether that is a 404 is the handler's decision.
    pub async fn resolve_province(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> AppResult<Option<String>> {
        let response = self.client.reverse(latitude, longitude).await?;
        Ok(province_from_address(&response.address))
    }
}

/// Province-level name from a Nominatim address, honorific stripped.
/// `address.province` wins over `address.state`.
pub fn province_from_address(address: &NominatimAddress) -> Option<String> {
    address
        .province
        .as_deref()
        .or(address.state.as_deref())
        .map(strip_honorific)
        .filter(|name| !name.is_empty())
}

/// Strip the leading "จังหวัด" honorific from a province name.
pub fn strip_honorific(name: &str) -> String {
    let trimmed = name.trim();
    trimmed
        .strip_prefix(PROVINCE_HONORIFIC)
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}
