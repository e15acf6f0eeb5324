use itertools::Itertools;
#[cfg(feature = "polygon-buffer")]
use log::warn;
use serde::{Deserialize, Serialize};

use crate::geometry::geo_traits::Shape;
use crate::geometry::primitives::{Point, SPolygon};
#[cfg(feature = "polygon-buffer")]
use ordered_float::OrderedFloat;

use anyhow::{Result, bail, ensure};

/// Whether to strictly inflate or deflate when making any modifications to shape.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeModifyMode {
    /// Modify the shape to be strictly larger than the original (superset).
    Inflate,
    /// Modify the shape to be strictly smaller than the original (subset).
    Deflate,
}

/// Offsets a [`SPolygon`] by a certain `distance` either outwards or inwards depending on the [`ShapeModifyMode`].
/// Joins are mitred, so convex corners stay sharp.
/// Relies on the [`geo_buffer`](https://crates.io/crates/geo-buffer) crate.
/// If deflating splits the polygon into multiple parts, the largest one is kept.
#[cfg(feature = "polygon-buffer")]
pub fn offset_shape(sp: &SPolygon, mode: ShapeModifyMode, distance: f64) -> Result<SPolygon> {
    ensure!(
        distance.is_finite() && distance >= 0.0,
        "offset distance must be a non-negative number, got {distance}"
    );
    if distance == 0.0 {
        return Ok(sp.clone());
    }
    let offset = match mode {
        ShapeModifyMode::Deflate => -distance,
        ShapeModifyMode::Inflate => distance,
    };

    // Convert the SPolygon to a geo_types::Polygon
    let geo_poly = geo_types::Polygon::new(
        sp.vertices.iter().map(|p| (p.0, p.1)).collect_vec().into(),
        vec![],
    );

    let parts = geo_buffer::buffer_polygon(&geo_poly, offset).0;
    if parts.len() > 1 {
        warn!(
            "[SHAPE] offset by {offset} m split the polygon into {} parts, keeping the largest",
            parts.len()
        );
    }
    let largest = parts.into_iter().max_by_key(|p| {
        let points = ring_points(p.exterior());
        OrderedFloat(SPolygon::calculate_area(&points).abs())
    });
    let Some(largest) = largest else {
        bail!("offsetting polygon by {offset} m leaves no area");
    };

    SPolygon::new(ring_points(largest.exterior()))
}

#[cfg(not(feature = "polygon-buffer"))]
pub fn offset_shape(_sp: &SPolygon, _mode: ShapeModifyMode, _distance: f64) -> Result<SPolygon> {
    bail!(
        "cannot offset arbitrary polygons without geo-buffer, compile with --features polygon-buffer to enable this"
    )
}

#[cfg(feature = "polygon-buffer")]
fn ring_points(ring: &geo_types::LineString<f64>) -> Vec<Point> {
    let mut points = ring.points().map(|p| Point(p.x(), p.y())).collect_vec();
    //pop the last point if it is the same as the first
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    points
}

/// Offsets a rectangle given by its center, dimensions and rotation.
/// Mitred offsetting of a rectangle is again a rectangle, so no polygon clipping is required.
pub fn offset_rectangle(
    center: Point,
    (width, height): (f64, f64),
    rotation_deg: f64,
    mode: ShapeModifyMode,
    distance: f64,
) -> Result<SPolygon> {
    let delta = match mode {
        ShapeModifyMode::Inflate => 2.0 * distance,
        ShapeModifyMode::Deflate => -2.0 * distance,
    };
    rotated_rectangle(center, (width + delta, height + delta), rotation_deg)
}

/// Rectangle of `width` (along the rotated x-axis) and `height`, centered on `center` and rotated
/// counterclockwise by `rotation_deg` degrees.
pub fn rotated_rectangle(
    center: Point,
    (width, height): (f64, f64),
    rotation_deg: f64,
) -> Result<SPolygon> {
    ensure!(
        width > 0.0 && height > 0.0,
        "rectangle dimensions must be positive, got {width} x {height}"
    );
    let (sin, cos) = rotation_deg.to_radians().sin_cos();
    let (hw, hh) = (width / 2.0, height / 2.0);

    let vertices = [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)]
        .into_iter()
        .map(|(x, y)| Point(center.0 + cos * x - sin * y, center.1 + sin * x + cos * y))
        .collect_vec();

    let bbox = SPolygon::generate_bounding_box(&vertices);
    let sp = SPolygon {
        vertices,
        bbox,
        area: width * height,
        diameter: (width.powi(2) + height.powi(2)).sqrt(),
    };
    debug_assert!((sp.area() - SPolygon::calculate_area(&sp.vertices)).abs() < 1e-6 * sp.area());
    Ok(sp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::geo_traits::Shape;

    #[test]
    fn rectangle_offset_grows_each_side() {
        let r = offset_rectangle(Point(0.0, 0.0), (8.0, 4.0), 0.0, ShapeModifyMode::Inflate, 2.0)
            .unwrap();
        assert!((r.area() - 12.0 * 8.0).abs() < 1e-9);
        assert!((r.bbox.x_min + 6.0).abs() < 1e-9);
        assert!((r.bbox.y_max - 4.0).abs() < 1e-9);
    }

    #[test]
    fn quarter_turn_swaps_extent() {
        let r = rotated_rectangle(Point(10.0, 10.0), (8.0, 4.0), 90.0).unwrap();
        assert!((r.bbox.width() - 4.0).abs() < 1e-9);
        assert!((r.bbox.height() - 8.0).abs() < 1e-9);
        assert!((r.centroid().0 - 10.0).abs() < 1e-9);
    }

    #[test]
    fn collapsing_rectangle_is_rejected() {
        let r = offset_rectangle(Point(0.0, 0.0), (8.0, 4.0), 0.0, ShapeModifyMode::Deflate, 2.0);
        assert!(r.is_err());
    }
}
