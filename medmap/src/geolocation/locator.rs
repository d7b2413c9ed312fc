//! Position sources and their failure modes.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use crate::geo::Coordinates;

/// Why the position could not be determined.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("Location permission denied")]
    Denied,

    #[error("Location unavailable: {0}")]
    Unavailable(String),

    #[error("Location request timed out after {0:?}")]
    Timeout(Duration),
}

/// Source of the user's position.
pub trait Geolocator: Send + Sync {
    /// Resolve the current position.
    fn locate(&self) -> impl Future<Output = Result<Coordinates, GeolocationError>> + Send;
}

/// Always reports the same position, optionally after a delay.
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocator {
    position: Coordinates,
    delay: Duration,
}

impl FixedGeolocator {
    pub fn new(position: Coordinates) -> Self {
        Self {
            position,
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Geolocator for FixedGeolocator {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.position)
    }
}

/// Always fails with the configured error.
#[derive(Debug, Clone)]
pub struct UnavailableGeolocator {
    error: GeolocationError,
}

impl UnavailableGeolocator {
    pub fn new(error: GeolocationError) -> Self {
        Self { error }
    }

    pub fn denied() -> Self {
        Self::new(GeolocationError::Denied)
    }
}

impl Geolocator for UnavailableGeolocator {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        Err(self.error.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_geolocator() {
        let here = Coordinates::new(35.1975, -0.63);
        assert_eq!(FixedGeolocator::new(here).locate().await, Ok(here));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fixed_geolocator_delay() {
        let here = Coordinates::new(35.1975, -0.63);
        let locator = FixedGeolocator::new(here).with_delay(Duration::from_secs(3));
        let started = tokio::time::Instant::now();
        assert_eq!(locator.locate().await, Ok(here));
        assert!(started.elapsed() >= Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_unavailable_geolocator() {
        let locator = UnavailableGeolocator::denied();
        assert_eq!(locator.locate().await, Err(GeolocationError::Denied));
    }
}
