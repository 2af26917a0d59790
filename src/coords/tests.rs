use crate::coords::consts::COORD_UPDATE_THRESHOLD;
use crate::coords::{is_significant_change, CoordinatePair};

fn pair(lat: f64, lng: f64) -> CoordinatePair {
    CoordinatePair::new(lat, lng).expect("Test coordinates must be finite.")
}

#[test]
fn test_non_finite_values_are_rejected() {
    assert!(CoordinatePair::new(f64::NAN, 1.0).is_none());
    assert!(CoordinatePair::new(1.0, f64::INFINITY).is_none());
    assert!(CoordinatePair::new(f64::NEG_INFINITY, f64::NAN).is_none());
    assert_eq!(
        CoordinatePair::new(-33.5, 151.25),
        Some(CoordinatePair {
            lat: -33.5,
            lng: 151.25
        })
    );
}

#[test]
fn test_first_coordinate_is_always_significant() {
    assert!(is_significant_change(
        None,
        pair(10.0, 20.0),
        COORD_UPDATE_THRESHOLD
    ));
}

#[test]
fn test_small_moves_on_both_axes_are_not_significant() {
    assert!(!is_significant_change(
        Some(pair(10.0, 20.0)),
        pair(10.005, 20.005),
        COORD_UPDATE_THRESHOLD,
    ));
}

#[test]
fn test_latitude_move_alone_is_significant() {
    assert!(is_significant_change(
        Some(pair(10.0, 20.0)),
        pair(10.02, 20.0),
        COORD_UPDATE_THRESHOLD,
    ));
}

#[test]
fn test_longitude_move_alone_is_significant() {
    assert!(is_significant_change(
        Some(pair(10.0, 20.0)),
        pair(10.0, 19.98),
        COORD_UPDATE_THRESHOLD,
    ));
}

#[test]
fn test_identical_coordinate_is_not_significant() {
    assert!(!is_significant_change(
        Some(pair(48.8566, 2.3522)),
        pair(48.8566, 2.3522),
        COORD_UPDATE_THRESHOLD,
    ));
}
