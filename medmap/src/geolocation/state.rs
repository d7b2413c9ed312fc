//! Progress and result of the latest location request.

use super::locator::GeolocationError;
use crate::geo::Coordinates;

/// Last known user position and the status of the current request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeolocationState {
    pub position: Option<Coordinates>,
    pub loading: bool,
    pub last_error: Option<GeolocationError>,
}

impl GeolocationState {
    /// A request started.
    pub fn begin(&mut self) {
        self.loading = true;
    }

    /// A request resolved. Non-finite positions are treated as unknown.
    pub fn resolve(&mut self, position: Coordinates) {
        self.loading = false;
        self.last_error = None;
        self.position = position.is_finite().then(|| position.clamped());
    }

    /// A request failed. A previously known position is kept.
    pub fn fail(&mut self, error: GeolocationError) {
        self.loading = false;
        self.last_error = Some(error);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
