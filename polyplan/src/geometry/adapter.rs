use crate::geometry::geo_traits::{CollidesWith, DistanceTo, Shape};
use crate::geometry::primitives::{Point, SPolygon};
use crate::geometry::shape_modification::{ShapeModifyMode, offset_shape};
use anyhow::Result;

/// The polygon capabilities the planner consumes.
/// All operations work in the local planar frame (meters), see [`LocalProjection`](crate::geometry::LocalProjection).
/// Any backend able to answer these questions can drive the placement search.
pub trait GeometryAdapter {
    fn polygon(&self, points: Vec<Point>) -> Result<SPolygon>;

    fn contains_point(&self, poly: &SPolygon, point: &Point) -> bool;

    /// `inner` lies entirely within `outer` (touching the boundary is allowed)
    fn within(&self, inner: &SPolygon, outer: &SPolygon) -> bool;

    /// The interiors of `a` and `b` intersect (this includes containment in either direction)
    fn overlaps(&self, a: &SPolygon, b: &SPolygon) -> bool;

    /// Grows (`distance > 0`) or shrinks (`distance < 0`) a polygon
    fn buffer(&self, poly: &SPolygon, distance: f64) -> Result<SPolygon>;

    fn area(&self, poly: &SPolygon) -> f64;

    fn centroid(&self, poly: &SPolygon) -> Point;

    fn distance(&self, a: &Point, b: &Point) -> f64;
}

/// Default [`GeometryAdapter`] backed by the primitives of this crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlanarGeometry;

impl GeometryAdapter for PlanarGeometry {
    fn polygon(&self, points: Vec<Point>) -> Result<SPolygon> {
        SPolygon::new(points)
    }

    fn contains_point(&self, poly: &SPolygon, point: &Point) -> bool {
        poly.collides_with(point)
    }

    fn within(&self, inner: &SPolygon, outer: &SPolygon) -> bool {
        inner.is_within(outer)
    }

    fn overlaps(&self, a: &SPolygon, b: &SPolygon) -> bool {
        a.overlaps(b)
    }

    fn buffer(&self, poly: &SPolygon, distance: f64) -> Result<SPolygon> {
        let mode = match distance < 0.0 {
            true => ShapeModifyMode::Deflate,
            false => ShapeModifyMode::Inflate,
        };
        offset_shape(poly, mode, distance.abs())
    }

    fn area(&self, poly: &SPolygon) -> f64 {
        poly.area()
    }

    fn centroid(&self, poly: &SPolygon) -> Point {
        poly.centroid()
    }

    fn distance(&self, a: &Point, b: &Point) -> f64 {
        a.distance_to(b)
    }
}
