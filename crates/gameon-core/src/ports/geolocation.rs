use async_trait::async_trait;

use crate::ports::errors::LocationError;
use crate::preferences::{LocationCoords, ReverseGeocodedAddress};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

#[async_trait]
pub trait GeolocationPort: Send + Sync {
    /// Asks for foreground location permission.
    async fn request_permission(&self) -> Result<PermissionStatus, LocationError>;

    async fn current_position(&self) -> Result<LocationCoords, LocationError>;

    /// `Ok(None)` when the coordinates resolve to no address.
    async fn reverse_geocode(
        &self,
        coords: LocationCoords,
    ) -> Result<Option<ReverseGeocodedAddress>, LocationError>;
}
