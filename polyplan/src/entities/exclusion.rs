use crate::geometry::primitives::SPolygon;

/// An area of the land in which no structure may be placed.
/// User defined zones and zones reported by terrain or regulatory lookups are treated identically.
#[derive(Clone, Debug)]
pub struct ExclusionZone {
    /// Planar shape, already grown by the configured clearance
    pub shape: SPolygon,
    pub reason: String,
}
