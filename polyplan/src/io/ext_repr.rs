use serde::{Deserialize, Serialize};

use crate::entities::{PlanConfig, PlanWarning};
use crate::geometry::LatLng;

/// External representation of a planning request
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtPlanRequest {
    #[serde(default)]
    pub name: String,
    /// Land boundary, ordered and (optionally) closed
    pub boundary: Vec<LatLng>,
    /// Zones reported by terrain or regulatory lookups
    #[serde(default)]
    pub exclusion_zones: Vec<ExtExclusionZone>,
    /// Replaces the default configuration of the optimizer when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<PlanConfig>,
}

/// External representation of an area in which nothing may be placed
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtExclusionZone {
    pub boundary: Vec<LatLng>,
    #[serde(default)]
    pub reason: String,
}

/// External representation of a [`Block`](crate::entities::Block)
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtBlock {
    pub index: usize,
    pub row: usize,
    pub col: usize,
    /// Offset of the block center relative to the structure center, before rotation (meters)
    pub local_position: (f64, f64),
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub corners: [LatLng; 4],
}

/// External representation of a [`Structure`](crate::entities::Structure)
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtStructure {
    pub id: usize,
    pub label: String,
    pub color: String,
    pub center: LatLng,
    /// Degrees, counterclockwise from east
    pub rotation: f64,
    /// Length along the gable axis (meters)
    pub gable_length: f64,
    /// Length along the gutter axis (meters)
    pub gutter_length: f64,
    pub inner_area: f64,
    pub footprint_area: f64,
    /// Closed ring
    pub footprint: Vec<LatLng>,
    pub blocks: Vec<ExtBlock>,
}

/// External representation of a [`PlanSolution`](crate::entities::PlanSolution)
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtPlan {
    pub name: String,
    pub structures: Vec<ExtStructure>,
    pub land_area: f64,
    pub coverage: f64,
    pub total_inner_area: f64,
    pub total_footprint_area: f64,
    pub n_blocks: usize,
    pub warnings: Vec<PlanWarning>,
    pub n_evaluations: usize,
    /// Wall-clock duration of the run in milliseconds
    pub elapsed_ms: u64,
}
