//! Reverse-geocoding response envelope

use serde::{Deserialize, Serialize};

/// Result of resolving GPS coordinates to a Thai province name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProvinceLookupResult {
    Success {
        success: bool,
        #[serde(rename = "provinceThai")]
        province_thai: String,
    },
    Failure {
        success: bool,
        message: String,
    },
}

impl ProvinceLookupResult {
    pub fn success(province_thai: impl Into<String>) -> Self {
        ProvinceLookupResult::Success {
            success: true,
            province_thai: province_thai.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        ProvinceLookupResult::Failure {
            success: false,
            message: message.into(),
        }
    }
}
