use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::geometry::DTransformation;
use crate::geometry::primitives::{Point, SPolygon};
use crate::geometry::shape_modification::{ShapeModifyMode, offset_rectangle, rotated_rectangle};

/// Dimensions of the block grid of a structure, in meters.
/// `gable` runs along the long axis and is a multiple of the block width,
/// `gutter` runs along the short axis and is a multiple of the block height.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct CandidateSize {
    pub gable: f64,
    pub gutter: f64,
}

impl CandidateSize {
    pub fn new(gable: f64, gutter: f64) -> Self {
        Self { gable, gutter }
    }

    /// Inner (block) area
    pub fn area(&self) -> f64 {
        self.gable * self.gutter
    }

    /// Number of bays along the gable and the gutter axis
    pub fn n_bays(&self, block_width: f64, block_height: f64) -> (usize, usize) {
        (
            (self.gable / block_width).round() as usize,
            (self.gutter / block_height).round() as usize,
        )
    }

    pub fn n_blocks(&self, block_width: f64, block_height: f64) -> usize {
        let (n_gable, n_gutter) = self.n_bays(block_width, block_height);
        n_gable * n_gutter
    }

    /// The size after adding `extra_gable` and `extra_gutter` whole bays
    pub fn extended(&self, (extra_gable, extra_gutter): (usize, usize), block_width: f64, block_height: f64) -> Self {
        Self {
            gable: self.gable + extra_gable as f64 * block_width,
            gutter: self.gutter + extra_gutter as f64 * block_height,
        }
    }
}

/// A rectangle of a certain size, rotation and position which is still being evaluated.
/// The gable axis points along the rotated x-axis: a rotation of 90° aligns the gable north-south.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    pub size: CandidateSize,
    /// Rotation in degrees, counterclockwise from east
    pub rotation: f64,
    pub center: Point,
}

impl Candidate {
    pub fn new(size: CandidateSize, rotation: f64, center: Point) -> Self {
        Self {
            size,
            rotation,
            center,
        }
    }

    pub fn area(&self) -> f64 {
        self.size.area()
    }

    /// The transformation that maps the unrotated, origin-centered block grid onto this candidate
    pub fn d_transformation(&self) -> DTransformation {
        DTransformation::new(self.rotation, self.center.into())
    }

    /// Rectangle covered by the blocks
    pub fn inner_shape(&self) -> Result<SPolygon> {
        rotated_rectangle(
            self.center,
            (self.size.gable, self.size.gutter),
            self.rotation,
        )
    }

    /// Rectangle covered by the blocks plus the surrounding gutter buffer
    pub fn footprint(&self, gutter_width: f64) -> Result<SPolygon> {
        offset_rectangle(
            self.center,
            (self.size.gable, self.size.gutter),
            self.rotation,
            ShapeModifyMode::Inflate,
            gutter_width,
        )
    }

    /// Area of [`Candidate::footprint`] without building the polygon
    pub fn footprint_area(&self, gutter_width: f64) -> f64 {
        (self.size.gable + 2.0 * gutter_width) * (self.size.gutter + 2.0 * gutter_width)
    }
}
