use anyhow::{Result, ensure};
use polyplan::entities::PlanConfig;
use polyplan::io::svg::SvgDrawOptions;
use serde::{Deserialize, Serialize};

use crate::opt::budget::SearchBudget;
use crate::opt::expansion::ExpansionConfig;
use crate::opt::grid::GridConfig;
use crate::opt::search::TwoPassConfig;

/// Configuration for the GSF optimizer
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GSFConfig {
    /// Default planning configuration, replaced by the one embedded in a request (if any)
    pub plan: PlanConfig,
    pub grid: GridConfig,
    pub budget: SearchBudget,
    /// Factor applied to the equivalent radius separation check of the corridor gap
    pub corridor_tolerance: f64,
    pub two_pass: TwoPassConfig,
    pub expansion: ExpansionConfig,
    /// Optional SVG drawing options
    pub svg_draw_options: SvgDrawOptions,
}

impl Default for GSFConfig {
    fn default() -> Self {
        Self {
            plan: PlanConfig::default(),
            grid: GridConfig::default(),
            budget: SearchBudget::default(),
            corridor_tolerance: 0.7,
            two_pass: TwoPassConfig::default(),
            expansion: ExpansionConfig::default(),
            svg_draw_options: SvgDrawOptions::default(),
        }
    }
}

impl GSFConfig {
    pub fn validate(&self) -> Result<()> {
        self.plan.validate()?;
        ensure!(
            self.grid.min_spacing > 0.0 && self.grid.min_spacing <= self.grid.max_spacing,
            "grid spacing bounds must satisfy 0 < min <= max, got min: {}, max: {}",
            self.grid.min_spacing,
            self.grid.max_spacing
        );
        ensure!(
            (0.0..=1.0).contains(&self.corridor_tolerance),
            "corridor tolerance must lie in [0, 1], got {}",
            self.corridor_tolerance
        );
        ensure!(
            (0.0..=1.0).contains(&self.two_pass.large_size_fraction),
            "large size fraction must lie in [0, 1], got {}",
            self.two_pass.large_size_fraction
        );
        Ok(())
    }
}
