use std::f64::consts::PI;

use slotmap::{SlotMap, new_key_type};

use crate::geometry::geo_traits::{CollidesWith, Shape};
use crate::geometry::primitives::{Point, SPolygon};

new_key_type! {
    /// Unique key for each structure placed in a [`SiteLayout`](crate::entities::SiteLayout)
    pub struct StructureKey;
}

/// Buffered footprint of a placed structure
#[derive(Clone, Debug)]
pub struct Footprint {
    pub shape: SPolygon,
    pub center: Point,
}

impl Footprint {
    pub fn new(shape: SPolygon, center: Point) -> Self {
        Self { shape, center }
    }

    pub fn area(&self) -> f64 {
        self.shape.area()
    }

    /// Radius of the circle with the same area
    pub fn equivalent_radius(&self) -> f64 {
        (self.area() / PI).sqrt()
    }
}

/// The footprints of all structures placed so far during a single run.
#[derive(Clone, Debug, Default)]
pub struct OccupiedSet {
    footprints: SlotMap<StructureKey, Footprint>,
}

impl OccupiedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, footprint: Footprint) -> StructureKey {
        self.footprints.insert(footprint)
    }

    /// Swaps the footprint of an already registered structure, returning the previous one
    pub fn replace(&mut self, key: StructureKey, footprint: Footprint) -> Option<Footprint> {
        self.footprints
            .get_mut(key)
            .map(|fp| std::mem::replace(fp, footprint))
    }

    pub fn get(&self, key: StructureKey) -> Option<&Footprint> {
        self.footprints.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StructureKey, &Footprint)> {
        self.footprints.iter()
    }

    /// All footprints, except the one registered under `ignored` (if any)
    pub fn iter_except(
        &self,
        ignored: Option<StructureKey>,
    ) -> impl Iterator<Item = &Footprint> {
        self.footprints
            .iter()
            .filter(move |(k, _)| Some(*k) != ignored)
            .map(|(_, fp)| fp)
    }

    /// True if the point lies inside (or on) any footprint
    pub fn covers(&self, point: &Point) -> bool {
        self.footprints
            .values()
            .any(|fp| fp.shape.bbox.collides_with(point) && fp.shape.collides_with(point))
    }

    pub fn total_area(&self) -> f64 {
        self.footprints.values().map(|fp| fp.area()).sum()
    }

    pub fn len(&self) -> usize {
        self.footprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.footprints.is_empty()
    }

    pub fn clear(&mut self) {
        self.footprints.clear();
    }
}
