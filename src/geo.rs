//! Distance computations.
//!
//! All coordinates use WGS84 (lat/lon in degrees).

use crate::network::Coordinate;

/// Earth radius in meters (WGS84 mean).
const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Haversine distance between two points in meters.
///
/// Symmetric: the endpoints are put in a canonical order before
/// evaluating so `haversine(a, b)` and `haversine(b, a)` are bit-identical.
pub fn haversine(a: &Coordinate, b: &Coordinate) -> f64 {
    let (a, b) = if (a.lat, a.lon) <= (b.lat, b.lon) { (a, b) } else { (b, a) };

    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

/// Great-circle distance between two coordinates in meters.
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    haversine(&a, &b)
}

/// Total length of a coordinate sequence in meters.
///
/// Zero for sequences with fewer than two points. Legs are summed in
/// ascending order, so a sequence and its reverse give the same result.
pub fn path_length(coords: &[Coordinate]) -> f64 {
    let mut legs: Vec<f64> = coords
        .windows(2)
        .map(|w| haversine(&w[0], &w[1]))
        .collect();
    legs.sort_by(f64::total_cmp);
    legs.iter().sum()
}
