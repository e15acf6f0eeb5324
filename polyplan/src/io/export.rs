use itertools::Itertools;

use crate::entities::{Block, PlanSolution, Structure};
use crate::geometry::primitives::SPolygon;
use crate::geometry::{LatLng, LocalProjection};
use crate::io::ext_repr::{ExtBlock, ExtPlan, ExtStructure};

/// Converts a planar polygon into a closed geographic ring
pub fn export_ring(shape: &SPolygon, projection: &LocalProjection) -> Vec<LatLng> {
    shape
        .vertices
        .iter()
        .chain(shape.vertices.first())
        .map(|p| projection.to_geo(*p))
        .collect_vec()
}

pub fn export_block(block: &Block, projection: &LocalProjection) -> ExtBlock {
    ExtBlock {
        index: block.index,
        row: block.row,
        col: block.col,
        local_position: block.local_position.into(),
        width: block.width,
        height: block.height,
        rotation: block.rotation,
        corners: block.corners.map(|c| projection.to_geo(c)),
    }
}

pub fn export_structure(structure: &Structure, projection: &LocalProjection) -> ExtStructure {
    ExtStructure {
        id: structure.id,
        label: structure.label.clone(),
        color: structure.color.clone(),
        center: projection.to_geo(structure.center),
        rotation: structure.rotation,
        gable_length: structure.size.gable,
        gutter_length: structure.size.gutter,
        inner_area: structure.inner_area,
        footprint_area: structure.footprint_area,
        footprint: export_ring(&structure.footprint, projection),
        blocks: structure
            .blocks
            .iter()
            .map(|b| export_block(b, projection))
            .collect(),
    }
}

pub fn export_plan(name: &str, solution: &PlanSolution, projection: &LocalProjection) -> ExtPlan {
    ExtPlan {
        name: name.to_string(),
        structures: solution
            .structures
            .iter()
            .map(|s| export_structure(s, projection))
            .collect(),
        land_area: solution.land_area,
        coverage: solution.coverage,
        total_inner_area: solution.total_inner_area,
        total_footprint_area: solution.total_footprint_area,
        n_blocks: solution.n_blocks,
        warnings: solution.warnings.clone(),
        n_evaluations: solution.n_evaluations,
        elapsed_ms: solution.elapsed.as_millis() as u64,
    }
}
