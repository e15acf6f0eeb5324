use anyhow::{Context, Result, bail, ensure};
use itertools::Itertools;
use log::debug;

use crate::geometry::geo_traits::Shape;
use crate::geometry::primitives::SPolygon;
use crate::geometry::{LatLng, LocalProjection};

/// The parcel of land on which structures are planned.
/// Immutable once created, all derived quantities are computed up front.
#[derive(Clone, Debug)]
pub struct LandArea {
    /// Closed geographic boundary (first vertex == last vertex)
    pub boundary: Vec<LatLng>,
    /// Projection between the geographic and the planar frame of this parcel
    pub projection: LocalProjection,
    /// The boundary in the planar frame (meters)
    pub shape: SPolygon,
    /// Area in square meters
    pub area: f64,
    pub centroid: LatLng,
}

impl LandArea {
    pub fn new(boundary: &[LatLng]) -> Result<Self> {
        ensure!(
            boundary
                .iter()
                .all(|ll| ll.lat.is_finite() && ll.lng.is_finite()),
            "land boundary contains non-finite coordinates"
        );
        if let Some(ll) = boundary
            .iter()
            .find(|ll| !(-90.0..=90.0).contains(&ll.lat) || !(-180.0..=180.0).contains(&ll.lng))
        {
            bail!("land boundary vertex out of range: {ll:?}");
        }

        let mut open_ring = boundary.to_vec();
        if open_ring.len() > 1 && open_ring.first() == open_ring.last() {
            open_ring.pop();
        }
        let n_distinct = open_ring
            .iter()
            .map(|ll| (ll.lat.to_bits(), ll.lng.to_bits()))
            .unique()
            .count();
        ensure!(
            n_distinct >= 3,
            "land boundary needs at least 3 distinct vertices, got {n_distinct}"
        );

        let origin = LatLng {
            lat: open_ring.iter().map(|ll| ll.lat).sum::<f64>() / open_ring.len() as f64,
            lng: open_ring.iter().map(|ll| ll.lng).sum::<f64>() / open_ring.len() as f64,
        };
        let projection = LocalProjection::new(origin);
        let planar = open_ring.iter().map(|ll| projection.to_local(*ll)).collect_vec();

        if SPolygon::is_self_intersecting(&planar) {
            bail!("land boundary is self-intersecting");
        }
        let shape = SPolygon::new(planar).context("invalid land boundary")?;
        let centroid = projection.to_geo(shape.centroid());

        let mut closed = open_ring;
        closed.push(closed[0]);

        debug!(
            "[LAND] {} vertices, {:.1} m², centroid ({:.6}, {:.6})",
            shape.n_vertices(),
            shape.area,
            centroid.lat,
            centroid.lng
        );

        Ok(LandArea {
            boundary: closed,
            projection,
            area: shape.area,
            shape,
            centroid,
        })
    }

    /// Latitude of the centroid, drives the solar orientation constraint
    pub fn latitude(&self) -> f64 {
        self.centroid.lat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_boundary(side_m: f64) -> Vec<LatLng> {
        let origin = LatLng::new(12.97, 77.59);
        let (d_lat, d_lng) = LocalProjection::new(origin).meters_to_degrees(side_m);
        vec![
            origin,
            LatLng::new(origin.lat, origin.lng + d_lng),
            LatLng::new(origin.lat + d_lat, origin.lng + d_lng),
            LatLng::new(origin.lat + d_lat, origin.lng),
            origin,
        ]
    }

    #[test]
    fn square_hectare_has_expected_area() {
        let land = LandArea::new(&square_boundary(100.0)).unwrap();
        assert!((land.area - 10_000.0).abs() < 10.0, "area: {}", land.area);
        assert_eq!(land.boundary.first(), land.boundary.last());
        assert!((land.latitude() - 12.97).abs() < 0.001);
    }

    #[test]
    fn two_vertices_are_rejected() {
        let b = square_boundary(10.0);
        assert!(LandArea::new(&b[0..2]).is_err());
        assert!(LandArea::new(&[b[0], b[1], b[0], b[1]]).is_err());
    }

    #[test]
    fn self_intersecting_boundary_is_rejected() {
        let b = square_boundary(10.0);
        let bowtie = vec![b[0], b[2], b[1], b[3], b[0]];
        assert!(LandArea::new(&bowtie).is_err());
    }
}
