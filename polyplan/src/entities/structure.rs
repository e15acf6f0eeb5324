use anyhow::{Result, ensure};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::entities::{Candidate, CandidateSize};
use crate::geometry::geo_traits::{Shape, Transformable};
use crate::geometry::primitives::{Point, Rect, SPolygon};

/// A validated, placed structure.
/// Built once by [`Structure::new`] and not modified afterward.
#[derive(Clone, Debug)]
pub struct Structure {
    /// Unique within a single plan, follows placement order
    pub id: usize,
    pub label: String,
    /// Hex color code (`#RRGGBB`)
    pub color: String,
    pub center: Point,
    /// Rotation in degrees
    pub rotation: f64,
    pub size: CandidateSize,
    /// Area covered by the blocks
    pub inner_area: f64,
    /// Area covered by the blocks and the gutter buffer
    pub footprint_area: f64,
    /// Block grid plus gutter buffer, in the planar frame
    pub footprint: SPolygon,
    /// Row-major, starting at the (unrotated) bottom-left corner
    pub blocks: Vec<Block>,
}

impl Structure {
    pub fn new(
        id: usize,
        label: String,
        color: String,
        candidate: &Candidate,
        block_dims: (f64, f64),
        gutter_width: f64,
    ) -> Result<Self> {
        let footprint = candidate.footprint(gutter_width)?;
        let blocks = Block::grid(candidate, block_dims)?;

        Ok(Structure {
            id,
            label,
            color,
            center: candidate.center,
            rotation: candidate.rotation,
            size: candidate.size,
            inner_area: candidate.area(),
            footprint_area: footprint.area(),
            footprint,
            blocks,
        })
    }

    pub fn candidate(&self) -> Candidate {
        Candidate::new(self.size, self.rotation, self.center)
    }
}

/// The smallest unit of a structure: one module of the block grid.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Block {
    /// Row-major index within the parent's grid
    pub index: usize,
    /// Row along the gutter axis
    pub row: usize,
    /// Column along the gable axis
    pub col: usize,
    /// Center of the block relative to the center of the parent, before rotation
    pub local_position: Point,
    pub width: f64,
    pub height: f64,
    /// Inherited from the parent
    pub rotation: f64,
    /// Counterclockwise, starting at the (unrotated) bottom-left corner
    pub corners: [Point; 4],
}

impl Block {
    /// Derives the full block grid of a candidate from its center, rotation and size.
    pub fn grid(candidate: &Candidate, (block_width, block_height): (f64, f64)) -> Result<Vec<Block>> {
        ensure!(
            block_width > 0.0 && block_height > 0.0,
            "block dimensions must be positive, got {block_width} x {block_height}"
        );
        let (n_cols, n_rows) = candidate.size.n_bays(block_width, block_height);
        let d_transf = candidate.d_transformation();
        let origin = Point(-candidate.size.gable / 2.0, -candidate.size.gutter / 2.0);

        let blocks = (0..n_rows)
            .cartesian_product(0..n_cols)
            .enumerate()
            .map(|(index, (row, col))| {
                let local_position = Point(
                    origin.0 + (col as f64 + 0.5) * block_width,
                    origin.1 + (row as f64 + 0.5) * block_height,
                );
                let local_rect = Rect {
                    x_min: local_position.0 - block_width / 2.0,
                    y_min: local_position.1 - block_height / 2.0,
                    x_max: local_position.0 + block_width / 2.0,
                    y_max: local_position.1 + block_height / 2.0,
                };
                let corners = local_rect.corners().map(|c| c.transform_clone(&d_transf));
                Block {
                    index,
                    row,
                    col,
                    local_position,
                    width: block_width,
                    height: block_height,
                    rotation: candidate.rotation,
                    corners,
                }
            })
            .collect_vec();

        Ok(blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::primitives::PointPosition;

    #[test]
    fn block_grid_tiles_the_inner_rectangle() {
        let candidate = Candidate::new(CandidateSize::new(24.0, 8.0), 30.0, Point(50.0, -20.0));
        let blocks = Block::grid(&candidate, (8.0, 4.0)).unwrap();
        assert_eq!(blocks.len(), 6);
        assert_eq!((blocks[4].row, blocks[4].col), (1, 1));

        let inner = candidate.inner_shape().unwrap();
        for corner in blocks.iter().flat_map(|b| b.corners) {
            assert_ne!(inner.position_of(&corner), PointPosition::Exterior);
        }
        let block_area: f64 = blocks.iter().map(|b| b.width * b.height).sum();
        assert!((block_area - candidate.area()).abs() < 1e-9);
    }

    #[test]
    fn structure_areas_are_consistent() {
        let candidate = Candidate::new(CandidateSize::new(16.0, 12.0), 90.0, Point(0.0, 0.0));
        let s = Structure::new(0, "P1".into(), "#4CAF50".into(), &candidate, (8.0, 4.0), 2.0)
            .unwrap();
        assert!((s.inner_area - 192.0).abs() < 1e-9);
        assert!((s.footprint_area - 20.0 * 16.0).abs() < 1e-9);
        assert_eq!(s.candidate(), candidate);
    }
}
