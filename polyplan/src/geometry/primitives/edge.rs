use crate::geometry::DTransformation;
use crate::geometry::geo_traits::{CollidesWith, DistanceTo, Transformable};
use crate::geometry::primitives::Point;
use anyhow::Result;
use anyhow::ensure;

/// Line segment between two [`Point`]s
#[derive(Clone, Debug, PartialEq, Copy)]
pub struct Edge {
    pub start: Point,
    pub end: Point,
}

impl Edge {
    pub fn try_new(start: Point, end: Point) -> Result<Self> {
        ensure!(start != end, "degenerate edge, {start:?} == {end:?}");
        Ok(Edge { start, end })
    }

    /// Returns the closest point which lies on the edge to the given point
    pub fn closest_point_on_edge(&self, point: &Point) -> Point {
        //from https://stackoverflow.com/a/6853926
        let Point(x1, y1) = self.start;
        let Point(x2, y2) = self.end;
        let Point(x, y) = point;

        let a = x - x1;
        let b = y - y1;
        let c = x2 - x1;
        let d = y2 - y1;

        let dot = a * c + b * d;
        let len_sq = c * c + d * d;
        let mut param = -1.0;
        if len_sq != 0.0 {
            param = dot / len_sq;
        }
        let (xx, yy) = match param {
            p if p < 0.0 => (x1, y1),              //start is the closest point
            p if p > 1.0 => (x2, y2),              //end is the closest point
            _ => (x1 + param * c, y1 + param * d), //closest point is on the edge
        };

        Point(xx, yy)
    }

    pub fn x_min(&self) -> f64 {
        f64::min(self.start.0, self.end.0)
    }

    pub fn y_min(&self) -> f64 {
        f64::min(self.start.1, self.end.1)
    }

    pub fn x_max(&self) -> f64 {
        f64::max(self.start.0, self.end.0)
    }

    pub fn y_max(&self) -> f64 {
        f64::max(self.start.1, self.end.1)
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    pub fn centroid(&self) -> Point {
        Point(
            (self.start.0 + self.end.0) / 2.0,
            (self.start.1 + self.end.1) / 2.0,
        )
    }
}

impl Transformable for Edge {
    fn transform(&mut self, t: &DTransformation) -> &mut Self {
        let Edge { start, end } = self;
        start.transform(t);
        end.transform(t);

        self
    }
}

impl DistanceTo<Point> for Edge {
    #[inline(always)]
    fn distance_to(&self, point: &Point) -> f64 {
        f64::sqrt(self.sq_distance_to(point))
    }

    #[inline(always)]
    fn sq_distance_to(&self, point: &Point) -> f64 {
        let Point(x, y) = point;
        let Point(xx, yy) = self.closest_point_on_edge(point);

        let (dx, dy) = (x - xx, y - yy);
        dx.powi(2) + dy.powi(2)
    }
}

impl DistanceTo<Edge> for Edge {
    fn distance_to(&self, other: &Edge) -> f64 {
        f64::sqrt(self.sq_distance_to(other))
    }

    fn sq_distance_to(&self, other: &Edge) -> f64 {
        if self.collides_with(other) {
            return 0.0;
        }
        //closest pair of points always involves at least one endpoint
        [
            self.sq_distance_to(&other.start),
            self.sq_distance_to(&other.end),
            other.sq_distance_to(&self.start),
            other.sq_distance_to(&self.end),
        ]
        .into_iter()
        .fold(f64::INFINITY, f64::min)
    }
}

impl CollidesWith<Edge> for Edge {
    #[inline(always)]
    fn collides_with(&self, other: &Edge) -> bool {
        edge_intersection(self, other).is_some()
    }
}

/// Returns the intersection point of two edges, if any.
/// Parallel (and collinear) edges are never reported as intersecting.
#[inline(always)]
pub fn edge_intersection(e1: &Edge, e2: &Edge) -> Option<Point> {
    if f64::max(e1.x_min(), e2.x_min()) > f64::min(e1.x_max(), e2.x_max())
        || f64::max(e1.y_min(), e2.y_min()) > f64::min(e1.y_max(), e2.y_max())
    {
        //bounding boxes do not overlap
        return None;
    }

    //based on: https://en.wikipedia.org/wiki/Line%E2%80%93line_intersection#Given_two_points_on_each_line_segment
    let Point(x1, y1) = e1.start;
    let Point(x2, y2) = e1.end;
    let Point(x3, y3) = e2.start;
    let Point(x4, y4) = e2.end;

    let t_nom = (x2 - x4) * (y4 - y3) - (y2 - y4) * (x4 - x3);
    let t_denom = (x2 - x1) * (y4 - y3) - (y2 - y1) * (x4 - x3);
    let u_nom = (x2 - x4) * (y2 - y1) - (y2 - y4) * (x2 - x1);
    let u_denom = (x2 - x1) * (y4 - y3) - (y2 - y1) * (x4 - x3);

    if t_denom == 0.0 || u_denom == 0.0 {
        //parallel edges
        None
    } else {
        let t = t_nom / t_denom;
        let u = u_nom / u_denom;
        if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
            Some(Point(x2 + t * (x1 - x2), y2 + t * (y1 - y2)))
        } else {
            None
        }
    }
}

/// True if the two edges cross each other at a point interior to both.
/// Touching at an endpoint does not count as crossing.
pub fn edges_cross(e1: &Edge, e2: &Edge) -> bool {
    let d1 = orientation(e2.start, e2.end, e1.start);
    let d2 = orientation(e2.start, e2.end, e1.end);
    let d3 = orientation(e1.start, e1.end, e2.start);
    let d4 = orientation(e1.start, e1.end, e2.end);

    ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
}

/// 2D cross product of (b - a) and (c - a), positive if a->b->c turns left
pub fn orientation(a: Point, b: Point, c: Point) -> f64 {
    (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossing_edges_intersect() {
        let e1 = Edge::try_new(Point(0.0, 0.0), Point(2.0, 2.0)).unwrap();
        let e2 = Edge::try_new(Point(0.0, 2.0), Point(2.0, 0.0)).unwrap();
        assert!(e1.collides_with(&e2));
        assert!(edges_cross(&e1, &e2));
        let p = edge_intersection(&e1, &e2).unwrap();
        assert!((p.0 - 1.0).abs() < 1e-9 && (p.1 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn touching_edges_do_not_cross() {
        let e1 = Edge::try_new(Point(0.0, 0.0), Point(1.0, 0.0)).unwrap();
        let e2 = Edge::try_new(Point(1.0, 0.0), Point(1.0, 1.0)).unwrap();
        assert!(!edges_cross(&e1, &e2));
    }

    #[test]
    fn parallel_edges_distance() {
        let e1 = Edge::try_new(Point(0.0, 0.0), Point(4.0, 0.0)).unwrap();
        let e2 = Edge::try_new(Point(1.0, 3.0), Point(2.0, 3.0)).unwrap();
        assert!((e1.distance_to(&e2) - 3.0).abs() < 1e-9);
    }
}
