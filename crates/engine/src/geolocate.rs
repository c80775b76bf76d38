use async_trait::async_trait;
use bpou_geodata::LonLat;
use std::time::Duration;
use thiserror::Error;

/// Upper bound on one device position read. Reads are never cached; every
/// request goes back to the sensor.
pub const GEOLOCATION_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeolocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("location unavailable")]
    Unavailable,

    #[error("location request timed out")]
    Timeout,

    #[error("location error: {0}")]
    Unknown(String),
}

/// Seam to the host's geolocation sensor: one request/response primitive
/// returning a coordinate or a typed failure.
#[async_trait]
pub trait GeolocationSensor: Send + Sync {
    async fn current_position(&self) -> Result<LonLat, GeolocationError>;
}

/// Reads the device position with the bounded timeout applied; an elapsed
/// timer surfaces as [`GeolocationError::Timeout`].
pub async fn read_position(sensor: &dyn GeolocationSensor) -> Result<LonLat, GeolocationError> {
    match tokio::time::timeout(GEOLOCATION_TIMEOUT, sensor.current_position()).await {
        Ok(result) => result,
        Err(_) => Err(GeolocationError::Timeout),
    }
}
