use slotmap::SecondaryMap;

use crate::entities::{Candidate, ExclusionZone, Footprint, LandArea, OccupiedSet, StructureKey};
use crate::geometry::primitives::SPolygon;
use crate::util::assertions;

/// A [`SiteLayout`] holds the structures placed on a parcel of land during a single run.
/// Every placed structure is registered in the [`OccupiedSet`] under the same key,
/// which is used to reject overlapping candidates.
#[derive(Clone, Debug)]
pub struct SiteLayout {
    pub land: LandArea,
    /// The land after applying the boundary setback: footprints must lie within this polygon
    pub buildable: SPolygon,
    pub exclusions: Vec<ExclusionZone>,
    occupied: OccupiedSet,
    placements: SecondaryMap<StructureKey, Candidate>,
    /// Keys in placement order
    order: Vec<StructureKey>,
}

impl SiteLayout {
    pub fn new(land: LandArea, buildable: SPolygon, exclusions: Vec<ExclusionZone>) -> Self {
        SiteLayout {
            land,
            buildable,
            exclusions,
            occupied: OccupiedSet::new(),
            placements: SecondaryMap::new(),
            order: vec![],
        }
    }

    /// Registers a validated candidate together with its buffered footprint.
    pub fn place(&mut self, candidate: Candidate, footprint: SPolygon) -> StructureKey {
        let key = self
            .occupied
            .insert(Footprint::new(footprint, candidate.center));
        self.placements.insert(key, candidate);
        self.order.push(key);

        debug_assert!(assertions::placements_match_occupied_set(self));

        key
    }

    /// Swaps the candidate placed under `key` for another one (e.g. an enlarged version).
    pub fn replace(&mut self, key: StructureKey, candidate: Candidate, footprint: SPolygon) {
        assert!(
            self.placements.contains_key(key),
            "key is not registered in this layout"
        );
        self.occupied
            .replace(key, Footprint::new(footprint, candidate.center));
        self.placements.insert(key, candidate);

        debug_assert!(assertions::placements_match_occupied_set(self));
    }

    /// Placed candidates in placement order
    pub fn placements(&self) -> impl Iterator<Item = (StructureKey, &Candidate)> {
        self.order.iter().map(|k| (*k, &self.placements[*k]))
    }

    pub fn placement(&self, key: StructureKey) -> Option<&Candidate> {
        self.placements.get(key)
    }

    pub fn keys(&self) -> &[StructureKey] {
        &self.order
    }

    pub fn occupied(&self) -> &OccupiedSet {
        &self.occupied
    }

    pub fn n_placed(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Sum of the footprint areas divided by the area of the land
    pub fn coverage(&self) -> f64 {
        self.occupied.total_area() / self.land.area
    }

    /// Sum of the block areas of all placed structures
    pub fn inner_area(&self) -> f64 {
        self.placements.values().map(|c| c.area()).sum()
    }

    /// Removes all placed structures, the land and exclusion zones are kept
    pub fn clear(&mut self) {
        self.occupied.clear();
        self.placements.clear();
        self.order.clear();
    }
}
