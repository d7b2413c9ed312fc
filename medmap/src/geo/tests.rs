//! Tests for distance math

use super::*;

const USER: Coordinates = Coordinates::new(35.1975, -0.6300);

#[test]
fn test_same_point_is_zero() {
    let d = distance_km(USER, Some(USER)).unwrap();
    assert_eq!(round_to_tenth(d), 0.0);
}

#[test]
fn test_one_hundredth_degree_north() {
    let entity = Coordinates::new(35.2075, -0.6300);
    let d = distance_km(entity, Some(USER)).unwrap();
    assert!((d - 1.11).abs() < 0.05, "expected ~1.11 km, got {}", d);
}

#[test]
fn test_unknown_user_position() {
    assert_eq!(distance_km(USER, None), None);
}

#[test]
fn test_one_degree_of_latitude() {
    let d = haversine_km(Coordinates::new(0.0, 0.0), Coordinates::new(1.0, 0.0)).unwrap();
    assert!((d - 111.19).abs() < 0.1, "1 degree should be ~111.19 km, got {}", d);
}

#[test]
fn test_symmetric() {
    let paris = Coordinates::new(48.8566, 2.3522);
    let algiers = Coordinates::new(36.7538, 3.0588);
    let there = haversine_km(paris, algiers).unwrap();
    let back = haversine_km(algiers, paris).unwrap();
    assert!((there - back).abs() < 1e-9);
    assert!((there - 1346.0).abs() < 10.0, "Paris-Algiers ~1346 km, got {}", there);
}

#[test]
fn test_out_of_range_is_clamped() {
    let beyond = Coordinates::new(95.0, 200.0);
    let pole = Coordinates::new(90.0, 180.0);
    let d1 = haversine_km(beyond, USER).unwrap();
    let d2 = haversine_km(pole, USER).unwrap();
    assert!((d1 - d2).abs() < 1e-9);
}

#[test]
fn test_antipodal_points() {
    let d = haversine_km(Coordinates::new(0.0, 0.0), Coordinates::new(0.0, 180.0)).unwrap();
    let half_circumference = std::f64::consts::PI * EARTH_RADIUS_KM;
    assert!((d - half_circumference).abs() < 1e-6);
}

#[test]
fn test_nan_yields_none() {
    let bad = Coordinates::new(f64::NAN, 3.0);
    assert_eq!(distance_km(bad, Some(USER)), None);
    assert_eq!(distance_km(USER, Some(bad)), None);
}

#[test]
fn test_compare_distance_unknown_last() {
    assert_eq!(compare_distance(Some(1.0), None), Ordering::Less);
    assert_eq!(compare_distance(None, Some(1.0)), Ordering::Greater);
    assert_eq!(compare_distance(None, None), Ordering::Equal);
    assert_eq!(compare_distance(Some(2.0), Some(1.0)), Ordering::Greater);
}

#[test]
fn test_validity() {
    assert!(USER.is_valid());
    assert!(!Coordinates::new(91.0, 0.0).is_valid());
    assert!(!Coordinates::new(0.0, f64::INFINITY).is_valid());
    assert!(!Coordinates::new(f64::NAN, 0.0).is_valid());
}

#[test]
fn test_format_distance() {
    assert_eq!(format_distance(0.85), "850 m");
    assert_eq!(format_distance(1.11), "1.1 km");
    assert_eq!(format_distance(12.0), "12.0 km");
}

#[test]
fn test_parse_coordinates() {
    let c: Coordinates = "35.1975, -0.63".parse().unwrap();
    assert_eq!(c, Coordinates::new(35.1975, -0.63));
    assert!("35.1975".parse::<Coordinates>().is_err());
    assert!("north,-0.63".parse::<Coordinates>().is_err());
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: distance is never negative and never exceeds half the circumference.
        #[test]
        fn prop_distance_bounded(
            lat1 in -120.0f64..120.0, lon1 in -400.0f64..400.0,
            lat2 in -120.0f64..120.0, lon2 in -400.0f64..400.0,
        ) {
            let d = haversine_km(Coordinates::new(lat1, lon1), Coordinates::new(lat2, lon2)).unwrap();
            prop_assert!(d >= 0.0);
            prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_KM + 1e-6);
        }
    }
}
