use std::sync::Arc;

use gameon_core::ports::{GeolocationPort, LocationError, PermissionStatus};
use gameon_core::LocationCoords;
use tracing::{info, info_span, warn, Instrument};

/// Device position with its human readable label.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub coords: LocationCoords,
    /// Empty when reverse geocoding found nothing.
    pub label: String,
}

/// Permission check, device position, then reverse geocode.
pub struct ResolveCurrentLocation {
    geolocation: Arc<dyn GeolocationPort>,
}

impl ResolveCurrentLocation {
    pub fn new(geolocation: Arc<dyn GeolocationPort>) -> Self {
        Self { geolocation }
    }

    /// # Returns / 返回值
    /// - `Err(PermissionDenied)` when the user refused access
    /// - `Err(Unavailable)` when no position could be obtained
    ///
    /// A failed reverse geocode is not an error: the coordinates are still
    /// returned with an empty label.
    pub async fn execute(&self) -> Result<ResolvedLocation, LocationError> {
        let span = info_span!("usecase.resolve_current_location.execute");

        async {
            match self.geolocation.request_permission().await? {
                PermissionStatus::Granted => {}
                PermissionStatus::Denied => {
                    info!("location permission denied");
                    return Err(LocationError::PermissionDenied);
                }
            }

            let coords = self.geolocation.current_position().await?;

            let label = match self.geolocation.reverse_geocode(coords).await {
                Ok(Some(address)) => address.label(),
                Ok(None) => String::new(),
                Err(err) => {
                    warn!(error = %err, "reverse geocode failed");
                    String::new()
                }
            };

            info!(has_label = !label.is_empty(), "current location resolved");
            Ok(ResolvedLocation { coords, label })
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::FakeGeolocation;
    use gameon_core::preferences::ReverseGeocodedAddress;

    const HERE: LocationCoords = LocationCoords {
        latitude: 51.5,
        longitude: -0.12,
    };

    #[tokio::test]
    async fn label_skips_empty_components() {
        let address = ReverseGeocodedAddress {
            name: Some("Court A".into()),
            street: Some("Main St".into()),
            city: Some(String::new()),
            region: Some("Central".into()),
        };
        let uc = ResolveCurrentLocation::new(Arc::new(FakeGeolocation::granted(
            HERE,
            Some(address),
        )));

        let resolved = uc.execute().await.unwrap();

        assert_eq!(resolved.coords, HERE);
        assert_eq!(resolved.label, "Court A, Main St, Central");
    }

    #[tokio::test]
    async fn denied_permission_is_reported() {
        let uc = ResolveCurrentLocation::new(Arc::new(FakeGeolocation::denied()));

        assert_eq!(uc.execute().await, Err(LocationError::PermissionDenied));
    }

    #[tokio::test]
    async fn geocode_failure_keeps_coordinates() {
        let mut geo = FakeGeolocation::granted(HERE, None);
        geo.address = Err(LocationError::Unavailable("no network".into()));
        let uc = ResolveCurrentLocation::new(Arc::new(geo));

        let resolved = uc.execute().await.unwrap();

        assert_eq!(resolved.coords, HERE);
        assert!(resolved.label.is_empty());
    }

    #[tokio::test]
    async fn position_failure_is_unavailable() {
        let mut geo = FakeGeolocation::granted(HERE, None);
        geo.position = Err(LocationError::Unavailable("timeout".into()));
        let uc = ResolveCurrentLocation::new(Arc::new(geo));

        assert!(matches!(
            uc.execute().await,
            Err(LocationError::Unavailable(_))
        ));
    }
}
