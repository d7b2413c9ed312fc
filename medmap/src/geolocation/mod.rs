//! User position.
//!
//! A [`Geolocator`] resolves the device position asynchronously; the engine
//! tracks the result in a [`GeolocationState`]. Failing to locate the user
//! only disables distance badges and distance sorting.

mod locator;
mod state;

pub use locator::{FixedGeolocator, GeolocationError, Geolocator, UnavailableGeolocator};
pub use state::GeolocationState;
