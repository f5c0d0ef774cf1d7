//! Distances between coordinates
//!
//! Geodesic distance uses Karney's algorithm on the WGS84 ellipsoid.
//! Haversine is a spherical approximation kept for cross-checks.

use crate::constants::geo::DISTANCE_DECIMALS;
use crate::coord::Coordinates;
use geo::{GeodesicDistance, HaversineDistance, Point};

/// Geodesic distance between two points in kilometres
pub fn geodesic_km(a: Coordinates, b: Coordinates) -> f64 {
    let a: Point<f64> = a.into();
    let b: Point<f64> = b.into();
    a.geodesic_distance(&b) / 1000.0
}

/// Great-circle distance on a sphere in kilometres
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let a: Point<f64> = a.into();
    let b: Point<f64> = b.into();
    a.haversine_distance(&b) / 1000.0
}

/// Round a distance for display
pub fn round_km(km: f64) -> f64 {
    let factor = 10f64.powi(DISTANCE_DECIMALS);
    (km * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_distance() {
        let p = Coordinates::new(3.5173, 103.4262);
        assert_eq!(geodesic_km(p, p), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let a = Coordinates::new(3.5173, 103.4262);
        let b = Coordinates::new(3.4912, 103.4140);
        assert_relative_eq!(geodesic_km(a, b), geodesic_km(b, a), epsilon = 1e-9);
    }

    #[test]
    fn test_one_degree_of_latitude_at_equator() {
        // WGS84 meridian arc from 0 to 1 degree is about 110.574 km
        let d = geodesic_km(Coordinates::new(0.0, 0.0), Coordinates::new(1.0, 0.0));
        assert_relative_eq!(d, 110.574, epsilon = 0.01);
    }

    #[test]
    fn test_agrees_with_haversine() {
        let pekan = Coordinates::new(3.4976, 103.4246);
        let kuantan = Coordinates::new(3.8077, 103.3260);
        let g = geodesic_km(pekan, kuantan);
        let h = haversine_km(pekan, kuantan);
        assert!((g - h).abs() / g < 0.005);
    }

    #[test]
    fn test_round_km() {
        assert_eq!(round_km(1.23456), 1.23);
        assert_eq!(round_km(1.235001), 1.24);
        assert_eq!(round_km(0.0), 0.0);
    }
}
