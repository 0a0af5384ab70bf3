//! Great-circle distance on a spherical Earth.
//!
//! Distances are computed with the haversine formula and kept at full
//! precision. Rounding to one decimal place happens only where results are
//! serialized (see [`round_km`]).

use crate::geo::GeoPoint;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Unit label attached to every result.
pub const DISTANCE_UNIT: &str = "km";

/// Haversine distance in kilometres between two coordinates in degrees.
#[inline]
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let sin_d_lat = (d_lat / 2.0).sin();
    let sin_d_lon = (d_lon / 2.0).sin();

    let h = sin_d_lat * sin_d_lat
        + lat1.to_radians().cos() * lat2.to_radians().cos() * sin_d_lon * sin_d_lon;
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Round a distance to one decimal place for display.
#[inline]
pub fn round_km(km: f64) -> f64 {
    (km * 10.0).round() / 10.0
}

/// Distance metric used by the batch workers.
///
/// Must be pure: batch workers call it concurrently from blocking threads
/// and the result cache assumes equal inputs give equal outputs.
pub trait DistanceFn: Send + Sync {
    /// Distance in kilometres between two points.
    fn km(&self, a: &GeoPoint, b: &GeoPoint) -> f64;
}

/// The haversine formula on a sphere of radius [`EARTH_RADIUS_KM`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Haversine;

impl DistanceFn for Haversine {
    #[inline]
    fn km(&self, a: &GeoPoint, b: &GeoPoint) -> f64 {
        haversine_km(a.latitude, a.longitude, b.latitude, b.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new("P", "Point", "Point", lat, lon)
    }

    #[test]
    fn test_same_point_is_zero() {
        assert_eq!(haversine_km(0.0, 0.0, 0.0, 0.0), 0.0);
        assert_eq!(haversine_km(51.5074, -0.1278, 51.5074, -0.1278), 0.0);
    }

    #[test]
    fn test_nairobi_to_addis_ababa() {
        // ~1162 km between the two capitals
        let km = haversine_km(-1.286389, 36.817223, 8.9806, 38.7578);
        assert!((km - 1162.0).abs() < 50.0, "got {}", km);
    }

    #[test]
    fn test_quarter_meridian() {
        // Equator to pole is a quarter of the circumference
        let km = haversine_km(0.0, 0.0, 90.0, 0.0);
        let expected = std::f64::consts::PI * EARTH_RADIUS_KM / 2.0;
        assert!((km - expected).abs() < 1e-6);
    }

    #[test]
    fn test_antipodes() {
        let km = haversine_km(0.0, 0.0, 0.0, 180.0);
        let expected = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((km - expected).abs() < 1e-6);
    }

    #[test]
    fn test_round_km() {
        assert_eq!(round_km(734.449), 734.4);
        assert_eq!(round_km(734.45001), 734.5);
        assert_eq!(round_km(0.0), 0.0);
    }

    #[test]
    fn test_haversine_trait() {
        let washington = point(38.9072, -77.0369);
        let ottawa = point(45.4215, -75.6972);
        let km = Haversine.km(&washington, &ottawa);
        assert!((km - 734.0).abs() < 5.0, "got {}", km);
    }

    proptest! {
        #[test]
        fn prop_symmetric(
            lat1 in -90.0f64..=90.0,
            lon1 in -180.0f64..=180.0,
            lat2 in -90.0f64..=90.0,
            lon2 in -180.0f64..=180.0,
        ) {
            let ab = haversine_km(lat1, lon1, lat2, lon2);
            let ba = haversine_km(lat2, lon2, lat1, lon1);
            prop_assert!((ab - ba).abs() < 1e-9);
        }

        #[test]
        fn prop_self_distance_is_zero(lat in -90.0f64..=90.0, lon in -180.0f64..=180.0) {
            prop_assert_eq!(haversine_km(lat, lon, lat, lon), 0.0);
        }

        #[test]
        fn prop_bounded_by_half_circumference(
            lat1 in -90.0f64..=90.0,
            lon1 in -180.0f64..=180.0,
            lat2 in -90.0f64..=90.0,
            lon2 in -180.0f64..=180.0,
        ) {
            let km = haversine_km(lat1, lon1, lat2, lon2);
            prop_assert!(km >= 0.0);
            prop_assert!(km <= std::f64::consts::PI * EARTH_RADIUS_KM + 1e-6);
        }
    }
}
