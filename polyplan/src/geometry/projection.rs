use serde::{Deserialize, Serialize};

use crate::geometry::primitives::Point;

/// Meters per degree of latitude (and of longitude at the equator)
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// Mean earth radius in meters, used for haversine distances
pub const EARTH_RADIUS: f64 = 6_371_008.8;

/// A geographic point in degrees (WGS84)
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance to `other` in meters
    pub fn haversine_distance(&self, other: &LatLng) -> f64 {
        let (phi_1, phi_2) = (self.lat.to_radians(), other.lat.to_radians());
        let d_phi = phi_2 - phi_1;
        let d_lambda = (other.lng - self.lng).to_radians();

        let a = (d_phi / 2.0).sin().powi(2)
            + phi_1.cos() * phi_2.cos() * (d_lambda / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS * a.sqrt().asin()
    }
}

/// Equirectangular projection around a reference point.
/// Accurate enough for parcels of a few square kilometers, which is all the planner deals with.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct LocalProjection {
    /// Geographic point mapped onto the origin of the planar frame
    pub origin: LatLng,
    m_per_deg_lat: f64,
    m_per_deg_lng: f64,
}

impl LocalProjection {
    pub fn new(origin: LatLng) -> Self {
        Self {
            origin,
            m_per_deg_lat: METERS_PER_DEGREE,
            m_per_deg_lng: METERS_PER_DEGREE * origin.lat.to_radians().cos(),
        }
    }

    pub fn to_local(&self, ll: LatLng) -> Point {
        Point(
            (ll.lng - self.origin.lng) * self.m_per_deg_lng,
            (ll.lat - self.origin.lat) * self.m_per_deg_lat,
        )
    }

    pub fn to_geo(&self, p: Point) -> LatLng {
        LatLng {
            lat: self.origin.lat + p.1 / self.m_per_deg_lat,
            lng: self.origin.lng + p.0 / self.m_per_deg_lng,
        }
    }

    /// Converts a distance in meters to (latitude, longitude) degree steps around the origin
    pub fn meters_to_degrees(&self, meters: f64) -> (f64, f64) {
        (meters / self.m_per_deg_lat, meters / self.m_per_deg_lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_round_trip_is_stable() {
        let proj = LocalProjection::new(LatLng::new(12.97, 77.59));
        let ll = LatLng::new(12.9712, 77.5921);
        let back = proj.to_geo(proj.to_local(ll));
        assert!((back.lat - ll.lat).abs() < 1e-12);
        assert!((back.lng - ll.lng).abs() < 1e-12);
    }

    #[test]
    fn projected_distance_matches_haversine() {
        let origin = LatLng::new(12.97, 77.59);
        let proj = LocalProjection::new(origin);
        let (d_lat, d_lng) = proj.meters_to_degrees(100.0);
        let north = LatLng::new(origin.lat + d_lat, origin.lng);
        let east = LatLng::new(origin.lat, origin.lng + d_lng);
        assert!((origin.haversine_distance(&north) - 100.0).abs() < 0.5);
        assert!((origin.haversine_distance(&east) - 100.0).abs() < 0.5);
    }
}
