//! Distance math between geographic positions.
//!
//! Everything here is total: out-of-range input is clamped and non-finite
//! input yields `None` instead of a panic, so callers in the display
//! pipeline never have to special-case bad provider data.

mod types;

#[cfg(test)]
mod tests;

pub use types::{Coordinates, EARTH_RADIUS_KM, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};

use std::cmp::Ordering;

const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Great-circle distance in kilometers between two known positions.
///
/// Uses the haversine formula on clamped inputs. Returns `None` when either
/// position contains a non-finite component.
pub fn haversine_km(a: Coordinates, b: Coordinates) -> Option<f64> {
    if !a.is_finite() || !b.is_finite() {
        return None;
    }
    let a = a.clamped();
    let b = b.clamped();

    let lat1 = a.latitude * DEG_TO_RAD;
    let lat2 = b.latitude * DEG_TO_RAD;
    let delta_lat = (b.latitude - a.latitude) * DEG_TO_RAD;
    let delta_lon = (b.longitude - a.longitude) * DEG_TO_RAD;

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push h a hair above 1.0 for antipodal points
    let c = 2.0 * h.clamp(0.0, 1.0).sqrt().asin();

    Some((EARTH_RADIUS_KM * c).max(0.0))
}

/// Distance from an entity to the user, if the user position is known.
///
/// # Example
///
/// ```
/// use medmap::geo::{distance_km, Coordinates};
///
/// let clinic = Coordinates::new(35.1975, -0.6300);
/// assert_eq!(distance_km(clinic, None), None);
/// assert_eq!(distance_km(clinic, Some(clinic)), Some(0.0));
/// ```
pub fn distance_km(entity: Coordinates, user: Option<Coordinates>) -> Option<f64> {
    haversine_km(entity, user?)
}

/// Ordering for optional distances where unknown sorts after every known value.
pub fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Round a distance to one decimal place (display precision).
#[inline]
pub fn round_to_tenth(km: f64) -> f64 {
    (km * 10.0).round() / 10.0
}

/// Human-readable distance badge.
///
/// Distances under one kilometer are shown in whole meters, everything else
/// in kilometers with one decimal.
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{} m", (km * 1000.0).round() as u64)
    } else {
        format!("{:.1} km", km)
    }
}
