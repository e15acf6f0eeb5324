use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::entities::Structure;

/// Plans with a coverage below this ratio carry a [`PlanWarning::LowCoverage`]
pub const LOW_COVERAGE_THRESHOLD: f64 = 0.3;

/// Conditions worth surfacing to a user, derived from the coverage of a plan
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanWarning {
    /// The land is too small or too irregular to hold a single structure
    NothingPlaced,
    /// Structures were placed, but they cover little of the land
    LowCoverage { coverage: f64 },
}

/// Outcome of a single planning run.
/// Not finding any placement is not an error, it yields an empty plan with a warning.
#[derive(Clone, Debug)]
pub struct PlanSolution {
    /// Final structures, in placement order
    pub structures: Vec<Structure>,
    /// Area of the land in m²
    pub land_area: f64,
    /// Sum of the footprint areas divided by the land area
    pub coverage: f64,
    pub total_inner_area: f64,
    pub total_footprint_area: f64,
    pub n_blocks: usize,
    pub warnings: Vec<PlanWarning>,
    /// Number of candidates that were validated
    pub n_evaluations: usize,
    pub elapsed: Duration,
}

impl PlanSolution {
    pub fn new(
        structures: Vec<Structure>,
        land_area: f64,
        n_evaluations: usize,
        elapsed: Duration,
    ) -> Self {
        let total_inner_area = structures.iter().map(|s| s.inner_area).sum();
        let total_footprint_area: f64 = structures.iter().map(|s| s.footprint_area).sum();
        let n_blocks = structures.iter().map(|s| s.blocks.len()).sum();
        let coverage = match land_area > 0.0 {
            true => total_footprint_area / land_area,
            false => 0.0,
        };

        let warnings = if structures.is_empty() {
            vec![PlanWarning::NothingPlaced]
        } else if coverage < LOW_COVERAGE_THRESHOLD {
            vec![PlanWarning::LowCoverage { coverage }]
        } else {
            vec![]
        };

        PlanSolution {
            structures,
            land_area,
            coverage,
            total_inner_area,
            total_footprint_area,
            n_blocks,
            warnings,
            n_evaluations,
            elapsed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_plan_warns_nothing_placed() {
        let sol = PlanSolution::new(vec![], 25.0, 0, Duration::ZERO);
        assert_eq!(sol.coverage, 0.0);
        assert_eq!(sol.warnings, vec![PlanWarning::NothingPlaced]);
    }
}
