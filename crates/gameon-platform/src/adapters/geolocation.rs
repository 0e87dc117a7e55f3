use async_trait::async_trait;
use gameon_core::config::LocationConfig;
use gameon_core::ports::{GeolocationPort, LocationError, PermissionStatus};
use gameon_core::preferences::ReverseGeocodedAddress;
use gameon_core::LocationCoords;
use tracing::debug;

/// Geolocation backed by the `[location]` config section.
///
/// Without coordinates the position is unavailable; the reverse geocode
/// returns the configured address components.
pub struct ConfiguredGeolocation {
    permission_granted: bool,
    coords: Option<LocationCoords>,
    address: ReverseGeocodedAddress,
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

impl ConfiguredGeolocation {
    pub fn from_config(config: &LocationConfig) -> Self {
        let coords = match (config.latitude, config.longitude) {
            (Some(latitude), Some(longitude)) => Some(LocationCoords {
                latitude,
                longitude,
            }),
            _ => None,
        };
        Self {
            permission_granted: config.permission_granted,
            coords,
            address: ReverseGeocodedAddress {
                name: non_empty(&config.name),
                street: non_empty(&config.street),
                city: non_empty(&config.city),
                region: non_empty(&config.region),
            },
        }
    }
}

#[async_trait]
impl GeolocationPort for ConfiguredGeolocation {
    async fn request_permission(&self) -> Result<PermissionStatus, LocationError> {
        Ok(if self.permission_granted {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        })
    }

    async fn current_position(&self) -> Result<LocationCoords, LocationError> {
        if !self.permission_granted {
            return Err(LocationError::PermissionDenied);
        }
        self.coords
            .ok_or_else(|| LocationError::Unavailable("no position configured".into()))
    }

    async fn reverse_geocode(
        &self,
        coords: LocationCoords,
    ) -> Result<Option<ReverseGeocodedAddress>, LocationError> {
        debug!(lat = coords.latitude, lon = coords.longitude, "reverse geocode");
        if self.address == ReverseGeocodedAddress::default() {
            return Ok(None);
        }
        Ok(Some(self.address.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LocationConfig {
        LocationConfig {
            latitude: Some(51.5),
            longitude: Some(-0.1),
            permission_granted: true,
            name: "Court A".into(),
            street: "Main St".into(),
            city: String::new(),
            region: "Central".into(),
        }
    }

    #[tokio::test]
    async fn configured_position_and_address() {
        let geo = ConfiguredGeolocation::from_config(&config());

        assert_eq!(geo.request_permission().await, Ok(PermissionStatus::Granted));
        let coords = geo.current_position().await.unwrap();
        let address = geo.reverse_geocode(coords).await.unwrap().unwrap();
        assert_eq!(address.label(), "Court A, Main St, Central");
    }

    #[tokio::test]
    async fn missing_coordinates_are_unavailable() {
        let mut cfg = config();
        cfg.longitude = None;
        let geo = ConfiguredGeolocation::from_config(&cfg);

        assert!(matches!(
            geo.current_position().await,
            Err(LocationError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn permission_defaults_to_denied() {
        let geo = ConfiguredGeolocation::from_config(&LocationConfig::default());

        assert_eq!(geo.request_permission().await, Ok(PermissionStatus::Denied));
    }
}
