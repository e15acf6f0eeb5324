use log::trace;
use polyplan::entities::{Candidate, SiteLayout, StructureKey};
use polyplan::geometry::GeometryAdapter;
use polyplan::geometry::geo_enums::GeoRelation;
use polyplan::geometry::primitives::{BOUNDARY_EPSILON, Rect, SPolygon};
use polyplan::geometry::shape_modification::{ShapeModifyMode, offset_rectangle};

/// Reason why a candidate cannot be placed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Footprint (partially) outside the buildable land
    OutsideLand,
    /// Footprint overlaps, contains or is contained by an occupied footprint
    Overlap,
    /// Closer to an occupied footprint than the corridor gap allows
    TooClose,
    /// Footprint intersects an exclusion zone
    Excluded,
    /// A geometric operation failed on the candidate
    Degenerate,
}

/// Decides whether a candidate can be placed in a [`SiteLayout`].
/// Checks are performed in order: land containment, overlap, corridor gap and exclusion zones.
#[derive(Debug)]
pub struct CandidateValidator<'a, G: GeometryAdapter> {
    pub geometry: &'a G,
    /// Buffer around the block grid, part of the footprint
    pub gutter_width: f64,
    /// Minimum clear distance between two footprints
    pub corridor_gap: f64,
    /// Multiplier on the equivalent radius separation, below 1 to avoid rejecting near-misses
    pub corridor_tolerance: f64,
}

impl<'a, G: GeometryAdapter> CandidateValidator<'a, G> {
    pub fn new(
        geometry: &'a G,
        gutter_width: f64,
        corridor_gap: f64,
        corridor_tolerance: f64,
    ) -> Self {
        Self {
            geometry,
            gutter_width,
            corridor_gap,
            corridor_tolerance,
        }
    }

    /// Validates `candidate` against the layout, ignoring the structure registered under `ignored`.
    /// Returns the footprint of the candidate if it can be placed.
    pub fn validate(
        &self,
        layout: &SiteLayout,
        candidate: &Candidate,
        ignored: Option<StructureKey>,
    ) -> Result<SPolygon, Rejection> {
        let footprint = candidate.footprint(self.gutter_width).map_err(|e| {
            trace!("[SEARCH] degenerate footprint for {candidate:?}: {e}");
            Rejection::Degenerate
        })?;

        //(a) containment within the buildable land
        if !bbox_within(&footprint.bbox, &layout.buildable.bbox)
            || !self.geometry.within(&footprint, &layout.buildable)
        {
            return Err(Rejection::OutsideLand);
        }

        //(b) no overlap with any occupied footprint
        let mut others = layout.occupied().iter_except(ignored);
        if others.any(|fp| {
            may_overlap(&footprint, &fp.shape) && self.geometry.overlaps(&footprint, &fp.shape)
        }) {
            return Err(Rejection::Overlap);
        }

        //(c) corridor gap
        if self.corridor_gap > 0.0 {
            let radius = (footprint.area / std::f64::consts::PI).sqrt();
            let too_close_by_radius = layout.occupied().iter_except(ignored).any(|fp| {
                let required =
                    (radius + fp.equivalent_radius() + self.corridor_gap) * self.corridor_tolerance;
                self.geometry.distance(&candidate.center, &fp.center) < required
            });
            if too_close_by_radius {
                return Err(Rejection::TooClose);
            }

            let clearance = offset_rectangle(
                candidate.center,
                (
                    candidate.size.gable + 2.0 * self.gutter_width,
                    candidate.size.gutter + 2.0 * self.gutter_width,
                ),
                candidate.rotation,
                ShapeModifyMode::Inflate,
                //footprints at exactly the gap distance are accepted
                self.corridor_gap - BOUNDARY_EPSILON,
            )
            .map_err(|_| Rejection::Degenerate)?;
            let encroached = layout
                .occupied()
                .iter_except(ignored)
                .any(|fp| {
                    may_overlap(&clearance, &fp.shape)
                        && self.geometry.overlaps(&clearance, &fp.shape)
                });
            if encroached {
                return Err(Rejection::TooClose);
            }
        }

        //(d) exclusion zones
        if layout
            .exclusions
            .iter()
            .any(|ez| {
                may_overlap(&footprint, &ez.shape) && self.geometry.overlaps(&footprint, &ez.shape)
            })
        {
            return Err(Rejection::Excluded);
        }

        Ok(footprint)
    }
}

impl<G: GeometryAdapter> Clone for CandidateValidator<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G: GeometryAdapter> Copy for CandidateValidator<'_, G> {}

/// Cheap bbox test, false only if the polygons cannot overlap
fn may_overlap(a: &SPolygon, b: &SPolygon) -> bool {
    a.bbox.relation_to(b.bbox) != GeoRelation::Disjoint
}

fn bbox_within(inner: &Rect, outer: &Rect) -> bool {
    inner.x_min >= outer.x_min - BOUNDARY_EPSILON
        && inner.y_min >= outer.y_min - BOUNDARY_EPSILON
        && inner.x_max <= outer.x_max + BOUNDARY_EPSILON
        && inner.y_max <= outer.y_max + BOUNDARY_EPSILON
}
