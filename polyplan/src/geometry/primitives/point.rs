use std::hash::{Hash, Hasher};

use crate::geometry::DTransformation;
use crate::geometry::geo_traits::{CollidesWith, DistanceTo, Transformable};
use serde::{Deserialize, Serialize};

/// Point in the local planar frame, coordinates in meters (x = east, y = north)
#[derive(Debug, Clone, PartialEq, Copy, Default, Serialize, Deserialize)]
pub struct Point(pub f64, pub f64);

impl Point {
    pub fn x(&self) -> f64 {
        self.0
    }

    pub fn y(&self) -> f64 {
        self.1
    }
}

impl Transformable for Point {
    fn transform(&mut self, t: &DTransformation) -> &mut Self {
        let Point(x, y) = self;
        let (sin, cos) = t.rotation_rad().sin_cos();
        let (tx, ty) = t.translation();
        let (nx, ny) = (cos * *x - sin * *y + tx, sin * *x + cos * *y + ty);
        *x = nx;
        *y = ny;
        self
    }
}

impl DistanceTo<Point> for Point {
    fn distance_to(&self, other: &Point) -> f64 {
        self.sq_distance_to(other).sqrt()
    }

    fn sq_distance_to(&self, other: &Point) -> f64 {
        (self.0 - other.0).powi(2) + (self.1 - other.1).powi(2)
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let x = self.0.to_bits();
        let y = self.1.to_bits();
        x.hash(state);
        y.hash(state);
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.0, p.1)
    }
}

impl From<(f64, f64)> for Point {
    fn from(p: (f64, f64)) -> Self {
        Point(p.0, p.1)
    }
}

impl<T> CollidesWith<T> for Point
where
    T: CollidesWith<Point>,
{
    fn collides_with(&self, other: &T) -> bool {
        other.collides_with(self)
    }
}
