use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

use crate::io::ext_repr::ExtExclusionZone;

/// How many orientations the placement search is allowed to try
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Every structure is placed at 90° (gable north-south)
    Uniform,
    /// 90° plus one boundary angle of the solar band
    Varied,
    /// Every 10° step within the solar band plus both exact boundary angles
    #[default]
    Optimized,
}

/// Configuration of a single planning request.
/// All lengths in meters, areas in square meters.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PlanConfig {
    /// Length of a block along the gable (long) axis of a structure
    pub block_width: f64,
    /// Length of a block along the gutter (short) axis of a structure
    pub block_height: f64,
    /// Buffer around the block grid of a structure, reserved for drainage
    pub gutter_width: f64,
    /// Minimum corridor between the footprints of two structures
    pub corridor_gap: f64,
    pub min_side_length: f64,
    pub max_side_length: f64,
    /// Maximum inner (block) area of a single structure
    pub max_structure_area: f64,
    /// Restrict rotations to the band in which gutters receive direct sun
    pub solar_orientation: bool,
    /// Overrides the latitude derived allowed deviation from 90° (degrees)
    pub solar_deviation_override: Option<f64>,
    pub strategy: Strategy,
    /// User defined areas in which nothing may be placed (wells, irrigation lines, ...)
    pub exclusion_zones: Vec<ExtExclusionZone>,
    /// Sizes with fewer blocks are never considered
    pub min_blocks_per_structure: Option<usize>,
    /// Distance to keep from the land boundary
    pub boundary_setback: f64,
    /// Distance to keep from every exclusion zone
    pub exclusion_clearance: f64,
    /// Upper bound on the number of placed structures
    pub max_structures: Option<usize>,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            block_width: 8.0,
            block_height: 4.0,
            gutter_width: 2.0,
            corridor_gap: 2.0,
            min_side_length: 4.0,
            max_side_length: 100.0,
            max_structure_area: 10_000.0,
            solar_orientation: true,
            solar_deviation_override: None,
            strategy: Strategy::Optimized,
            exclusion_zones: vec![],
            min_blocks_per_structure: None,
            boundary_setback: 0.0,
            exclusion_clearance: 0.0,
            max_structures: None,
        }
    }
}

impl PlanConfig {
    /// Rejects configurations the planner cannot work with
    pub fn validate(&self) -> Result<()> {
        let finite_non_neg = |v: f64| v.is_finite() && v >= 0.0;

        ensure!(
            self.block_width > 0.0 && self.block_height > 0.0,
            "block module dimensions must be positive, got {} x {}",
            self.block_width,
            self.block_height
        );
        ensure!(
            finite_non_neg(self.gutter_width),
            "gutter width must be non-negative, got {}",
            self.gutter_width
        );
        ensure!(
            finite_non_neg(self.corridor_gap),
            "corridor gap must be non-negative, got {}",
            self.corridor_gap
        );
        ensure!(
            self.min_side_length > 0.0 && self.max_side_length.is_finite(),
            "side lengths must be positive and finite, got min: {}, max: {}",
            self.min_side_length,
            self.max_side_length
        );
        ensure!(
            self.min_side_length <= self.max_side_length,
            "minimum side length ({}) exceeds maximum side length ({})",
            self.min_side_length,
            self.max_side_length
        );
        ensure!(
            self.max_structure_area > 0.0,
            "maximum structure area must be positive, got {}",
            self.max_structure_area
        );
        if let Some(dev) = self.solar_deviation_override {
            ensure!(
                (0.0..=90.0).contains(&dev),
                "solar deviation override must lie in [0, 90] degrees, got {dev}"
            );
        }
        ensure!(
            finite_non_neg(self.boundary_setback) && finite_non_neg(self.exclusion_clearance),
            "setback and clearance must be non-negative, got {} and {}",
            self.boundary_setback,
            self.exclusion_clearance
        );
        ensure!(
            self.max_structures != Some(0),
            "max_structures must be at least 1 when set"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(PlanConfig::default().validate().is_ok());
    }

    #[test]
    fn inverted_side_lengths_are_rejected() {
        let config = PlanConfig {
            min_side_length: 50.0,
            max_side_length: 20.0,
            ..PlanConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn strategy_serializes_lowercase() {
        let json = serde_json::to_string(&Strategy::Varied).unwrap();
        assert_eq!(json, "\"varied\"");
        let config: PlanConfig = serde_json::from_str(r#"{"strategy": "uniform"}"#).unwrap();
        assert_eq!(config.strategy, Strategy::Uniform);
        assert_eq!(config.block_width, 8.0);
    }
}
