//! Reverse-geocoded address formatting.

use serde::{Deserialize, Serialize};

/// Address components returned by a reverse geocode lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReverseGeocodedAddress {
    pub name: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
}

impl ReverseGeocodedAddress {
    /// Human readable label: name, street, city, region joined by `", "`.
    ///
    /// Missing and empty components are skipped, so the label never carries
    /// doubled or trailing separators.
    pub fn label(&self) -> String {
        [&self.name, &self.street, &self.city, &self.region]
            .into_iter()
            .filter_map(|c| c.as_deref())
            .filter(|c| !c.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
