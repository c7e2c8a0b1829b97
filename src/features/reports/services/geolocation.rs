use async_trait::async_trait;

use crate::features::reports::models::{Coordinates, LocationFix, LocationStatus};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeolocationError {
    #[error("Geolocation is not supported by this device")]
    Unsupported,

    #[error("Geolocation failed: {0}")]
    Failed(String),
}

/// Source of the device position
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}

/// Outcome of a geolocation call made by the browser and forwarded by the
/// client
#[derive(Debug, Clone, PartialEq)]
pub enum ReportedPosition {
    Position(Coordinates),
    Failed(String),
    Unsupported,
}

#[async_trait]
impl Geolocator for ReportedPosition {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        match self {
            ReportedPosition::Position(coordinates) if coordinates.is_valid() => Ok(*coordinates),
            ReportedPosition::Position(coordinates) => Err(GeolocationError::Failed(format!(
                "coordinates out of range: {}, {}",
                coordinates.latitude, coordinates.longitude
            ))),
            ReportedPosition::Failed(reason) => Err(GeolocationError::Failed(reason.clone())),
            ReportedPosition::Unsupported => Err(GeolocationError::Unsupported),
        }
    }
}

/// Try the geolocator once, falling back to `fallback` on any failure
pub async fn acquire_location(geolocator: &dyn Geolocator, fallback: Coordinates) -> LocationFix {
    match geolocator.current_position().await {
        Ok(coordinates) => LocationFix {
            coordinates,
            status: LocationStatus::Success,
        },
        Err(e) => {
            tracing::debug!("Using fallback location: {}", e);
            LocationFix {
                coordinates: fallback,
                status: LocationStatus::Error,
            }
        }
    }
}
