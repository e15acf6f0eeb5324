use std::borrow::Borrow;

use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::geometry::DTransformation;
use crate::geometry::convex_hull::convex_hull_from_points;
use crate::geometry::geo_traits::{CollidesWith, DistanceTo, Shape, Transformable};
use crate::geometry::primitives::edges_cross;
use crate::geometry::primitives::{Edge, Point, Rect};
use anyhow::{Result, bail};

/// Distance (in meters) under which a point is considered to lie on the boundary of a polygon
pub const BOUNDARY_EPSILON: f64 = 1e-7;

/// A Simple Polygon is a polygon that does not intersect itself and contains no holes.
/// Vertices are stored counterclockwise, the closing vertex is implicit.
/// [read more](https://en.wikipedia.org/wiki/Simple_polygon)
#[derive(Clone, Debug)]
pub struct SPolygon {
    /// Set of points that form the polygon
    pub vertices: Vec<Point>,
    /// Bounding box
    pub bbox: Rect,
    /// Area of its interior
    pub area: f64,
    /// Maximum distance between any two points in the polygon
    pub diameter: f64,
}

impl SPolygon {
    /// Create a new simple polygon from a set of points.
    /// A trailing point equal to the first one (closed ring) is dropped.
    pub fn new(mut points: Vec<Point>) -> Result<Self> {
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        if points.len() < 3 {
            bail!("simple polygon must have at least 3 points: {points:?}");
        }
        if points.iter().unique().count() != points.len() {
            bail!("simple polygon should not contain duplicate points: {points:?}");
        }

        let area = match SPolygon::calculate_area(&points) {
            0.0 => bail!("simple polygon has no area: {points:?}"),
            area if area < 0.0 => {
                //vertices should always be ordered counterclockwise (positive area)
                points.reverse();
                -area
            }
            area => area,
        };

        let diameter = SPolygon::calculate_diameter(points.clone());
        let bbox = SPolygon::generate_bounding_box(&points);

        Ok(SPolygon {
            vertices: points,
            bbox,
            area,
            diameter,
        })
    }

    pub fn vertex(&self, i: usize) -> Point {
        self.vertices[i]
    }

    pub fn edge(&self, i: usize) -> Edge {
        let j = (i + 1) % self.n_vertices();
        Edge {
            start: self.vertices[i],
            end: self.vertices[j],
        }
    }

    pub fn edge_iter(&self) -> impl Iterator<Item = Edge> + '_ {
        (0..self.n_vertices()).map(move |i| self.edge(i))
    }

    pub fn n_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn calculate_diameter(points: Vec<Point>) -> f64 {
        //The two points furthest apart must be part of the convex hull
        let ch = convex_hull_from_points(points);

        //go through all pairs of points and find the pair with the largest distance
        let sq_diam = ch
            .iter()
            .tuple_combinations()
            .map(|(p1, p2)| p1.sq_distance_to(p2))
            .max_by_key(|sq_d| OrderedFloat(*sq_d))
            .unwrap_or(0.0);

        sq_diam.sqrt()
    }

    pub fn generate_bounding_box(points: &[Point]) -> Rect {
        let (mut x_min, mut y_min) = (f64::MAX, f64::MAX);
        let (mut x_max, mut y_max) = (f64::MIN, f64::MIN);

        for point in points.iter() {
            x_min = x_min.min(point.0);
            y_min = y_min.min(point.1);
            x_max = x_max.max(point.0);
            y_max = y_max.max(point.1);
        }
        Rect {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    //https://en.wikipedia.org/wiki/Shoelace_formula
    //counterclockwise = positive area, clockwise = negative area
    pub fn calculate_area(points: &[Point]) -> f64 {
        let mut sigma: f64 = 0.0;
        for i in 0..points.len() {
            //next point
            let j = (i + 1) % points.len();

            let (x_i, y_i) = points[i].into();
            let (x_j, y_j) = points[j].into();

            sigma += (y_i + y_j) * (x_i - x_j)
        }

        0.5 * sigma
    }

    /// True if any two non-adjacent edges of the ring cross or touch each other
    pub fn is_self_intersecting(points: &[Point]) -> bool {
        let n = points.len();
        if n < 4 {
            return false;
        }
        let edges = (0..n)
            .map(|i| Edge {
                start: points[i],
                end: points[(i + 1) % n],
            })
            .collect_vec();

        edges.iter().enumerate().tuple_combinations().any(|((i, e1), (j, e2))| {
            let adjacent = j == i + 1 || (i == 0 && j == n - 1);
            !adjacent && e1.collides_with(e2)
        })
    }

    /// Location of a point relative to the polygon. Points within [`BOUNDARY_EPSILON`] of an edge are on the boundary.
    pub fn position_of(&self, point: &Point) -> PointPosition {
        if self.boundary_sq_distance(point) <= BOUNDARY_EPSILON.powi(2) {
            PointPosition::Boundary
        } else if self.collides_with(point) {
            PointPosition::Interior
        } else {
            PointPosition::Exterior
        }
    }

    /// Squared distance from a point to the closest edge of the polygon
    pub fn boundary_sq_distance(&self, point: &Point) -> f64 {
        self.edge_iter()
            .map(|e| e.sq_distance_to(point))
            .fold(f64::INFINITY, f64::min)
    }

    /// True if `self` lies entirely within `other`, touching the boundary of `other` is allowed.
    pub fn is_within(&self, other: &SPolygon) -> bool {
        if !rect_within(&self.bbox, &other.bbox) {
            return false;
        }
        let probes_inside = self
            .vertices
            .iter()
            .copied()
            .chain(self.edge_iter().map(|e| e.centroid()))
            .all(|p| other.position_of(&p) != PointPosition::Exterior);

        probes_inside
            && !self.edges_cross(other)
            && other
                .vertices
                .iter()
                .all(|p| self.position_of(p) != PointPosition::Interior)
    }

    /// True if the interiors of `self` and `other` overlap.
    /// Polygons that merely share (part of) their boundary do not overlap.
    pub fn overlaps(&self, other: &SPolygon) -> bool {
        if !self.bbox.collides_with(&other.bbox) {
            return false;
        }
        if self.edges_cross(other) {
            return true;
        }
        let strictly_inside = |probes: &SPolygon, target: &SPolygon| {
            //the centroid of a concave polygon can lie outside of it
            let centroid = Some(probes.centroid())
                .filter(|c| probes.position_of(c) == PointPosition::Interior);
            probes
                .vertices
                .iter()
                .copied()
                .chain(probes.edge_iter().map(|e| e.centroid()))
                .chain(centroid)
                .any(|p| target.position_of(&p) == PointPosition::Interior)
        };
        strictly_inside(self, other) || strictly_inside(other, self)
    }

    fn edges_cross(&self, other: &SPolygon) -> bool {
        self.edge_iter()
            .cartesian_product(other.edge_iter().collect_vec())
            .any(|(e1, e2)| edges_cross(&e1, &e2))
    }
}

fn rect_within(inner: &Rect, outer: &Rect) -> bool {
    inner.x_min >= outer.x_min - BOUNDARY_EPSILON
        && inner.y_min >= outer.y_min - BOUNDARY_EPSILON
        && inner.x_max <= outer.x_max + BOUNDARY_EPSILON
        && inner.y_max <= outer.y_max + BOUNDARY_EPSILON
}

/// Location of a point with respect to a polygon, including its boundary
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointPosition {
    Interior,
    Boundary,
    Exterior,
}

impl Shape for SPolygon {
    fn centroid(&self) -> Point {
        //based on: https://en.wikipedia.org/wiki/Centroid#Of_a_polygon
        let area = self.area();
        let mut c_x = 0.0;
        let mut c_y = 0.0;

        for i in 0..self.n_vertices() {
            let j = if i == self.n_vertices() - 1 { 0 } else { i + 1 };
            let Point(x_i, y_i) = self.vertex(i);
            let Point(x_j, y_j) = self.vertex(j);
            c_x += (x_i + x_j) * (x_i * y_j - x_j * y_i);
            c_y += (y_i + y_j) * (x_i * y_j - x_j * y_i);
        }

        c_x /= 6.0 * area;
        c_y /= 6.0 * area;

        (c_x, c_y).into()
    }

    fn area(&self) -> f64 {
        self.area
    }

    fn bbox(&self) -> Rect {
        self.bbox
    }

    fn diameter(&self) -> f64 {
        self.diameter
    }
}

impl Transformable for SPolygon {
    fn transform(&mut self, t: &DTransformation) -> &mut Self {
        //destructuring pattern to ensure that the code is updated when the struct changes
        let SPolygon {
            vertices,
            bbox,
            area: _,
            diameter: _,
        } = self;

        vertices.iter_mut().for_each(|p| {
            p.transform(t);
        });

        //regenerate bounding box
        *bbox = SPolygon::generate_bounding_box(vertices);

        self
    }
}

impl CollidesWith<Point> for SPolygon {
    fn collides_with(&self, point: &Point) -> bool {
        //crossing number test: https://wrfranklin.org/Research/Short_Notes/pnpoly.html
        if !self.bbox.collides_with(point) {
            return false;
        }
        let Point(px, py) = *point;
        let mut inside = false;
        for edge in self.edge_iter() {
            let Point(x_i, y_i) = edge.start;
            let Point(x_j, y_j) = edge.end;
            if (y_i > py) != (y_j > py) && px < (x_j - x_i) * (py - y_i) / (y_j - y_i) + x_i {
                inside = !inside;
            }
        }
        inside
    }
}

impl CollidesWith<SPolygon> for SPolygon {
    fn collides_with(&self, other: &SPolygon) -> bool {
        self.overlaps(other)
    }
}

impl DistanceTo<Point> for SPolygon {
    fn distance_to(&self, point: &Point) -> f64 {
        self.sq_distance_to(point).sqrt()
    }

    fn sq_distance_to(&self, point: &Point) -> f64 {
        match self.collides_with(point) {
            true => 0.0,
            false => self.boundary_sq_distance(point),
        }
    }
}

impl DistanceTo<SPolygon> for SPolygon {
    fn distance_to(&self, other: &SPolygon) -> f64 {
        self.sq_distance_to(other).sqrt()
    }

    fn sq_distance_to(&self, other: &SPolygon) -> f64 {
        if self.overlaps(other) {
            return 0.0;
        }
        self.edge_iter()
            .cartesian_product(other.edge_iter().collect_vec())
            .map(|(e1, e2)| e1.sq_distance_to(&e2))
            .fold(f64::INFINITY, f64::min)
    }
}

impl<T> From<T> for SPolygon
where
    T: Borrow<Rect>,
{
    fn from(r: T) -> Self {
        let r = r.borrow();
        let area = r.area();
        SPolygon {
            vertices: r.corners().to_vec(),
            bbox: *r,
            area,
            diameter: r.diameter(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64, size: f64) -> SPolygon {
        SPolygon::from(Rect::try_new(x, y, x + size, y + size).unwrap())
    }

    #[test]
    fn clockwise_input_is_reoriented() {
        let cw = vec![Point(0.0, 0.0), Point(0.0, 1.0), Point(1.0, 1.0), Point(1.0, 0.0)];
        let sp = SPolygon::new(cw).unwrap();
        assert!(SPolygon::calculate_area(&sp.vertices) > 0.0);
        assert!((sp.area - 1.0).abs() < 1e-12);
    }

    #[test]
    fn closed_ring_is_accepted() {
        let ring = vec![Point(0.0, 0.0), Point(2.0, 0.0), Point(2.0, 2.0), Point(0.0, 0.0)];
        let sp = SPolygon::new(ring).unwrap();
        assert_eq!(sp.n_vertices(), 3);
    }

    #[test]
    fn bowtie_is_self_intersecting() {
        let bowtie = [Point(0.0, 0.0), Point(2.0, 2.0), Point(2.0, 0.0), Point(0.0, 2.0)];
        assert!(SPolygon::is_self_intersecting(&bowtie));
        assert!(!SPolygon::is_self_intersecting(&square(0.0, 0.0, 1.0).vertices));
    }

    #[test]
    fn adjacent_squares_do_not_overlap() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(10.0, 0.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(a.distance_to(&b) < 1e-9);
    }

    #[test]
    fn identical_and_nested_squares_overlap() {
        let a = square(0.0, 0.0, 10.0);
        assert!(a.overlaps(&a.clone()));
        assert!(a.overlaps(&square(2.0, 2.0, 2.0)));
        assert!(square(2.0, 2.0, 2.0).overlaps(&a));
    }

    #[test]
    fn within_allows_touching_boundary() {
        let outer = square(0.0, 0.0, 10.0);
        assert!(square(0.0, 0.0, 5.0).is_within(&outer));
        assert!(!square(6.0, 6.0, 5.0).is_within(&outer));
    }

    #[test]
    fn within_rejects_concave_notch() {
        // U-shaped polygon, the notch spans x in [4, 6] for y above 2
        let u = SPolygon::new(vec![
            Point(0.0, 0.0),
            Point(10.0, 0.0),
            Point(10.0, 10.0),
            Point(6.0, 10.0),
            Point(6.0, 2.0),
            Point(4.0, 2.0),
            Point(4.0, 10.0),
            Point(0.0, 10.0),
        ])
        .unwrap();
        assert!(!square(3.0, 4.0, 4.0).is_within(&u));
        assert!(square(1.0, 4.0, 2.0).is_within(&u));
    }
}
