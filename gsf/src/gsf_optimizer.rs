use anyhow::Result;
use log::{info, warn};
use polyplan::entities::{PlanSolution, SiteLayout};
use polyplan::geometry::{GeometryAdapter, PlanarGeometry};
use polyplan::io::ext_repr::ExtPlanRequest;
use polyplan::io::import::Importer;
use polyplan::util::assertions;
use thousands::Separable;

use crate::config::GSFConfig;
use crate::opt::assembler::assemble;
use crate::opt::budget::BudgetTracker;
use crate::opt::expansion::expand;
use crate::opt::grid::ScanGrid;
use crate::opt::orientation::permitted_orientations;
use crate::opt::search::PlacementSearch;
use crate::opt::sizes::candidate_sizes;
use crate::opt::validator::CandidateValidator;

/// Grid Scan Fill (GSF) optimizer: places as many large structures as possible by greedily
/// scanning a grid of center positions, then grows them into the remaining free space.
pub struct GSFOptimizer<G: GeometryAdapter = PlanarGeometry> {
    pub layout: SiteLayout,
    pub config: GSFConfig,
    pub geometry: G,
}

impl GSFOptimizer {
    pub fn new(layout: SiteLayout, config: GSFConfig) -> Self {
        Self::with_geometry(layout, config, PlanarGeometry)
    }

    /// Imports the request and sets up an optimizer for it.
    /// A configuration embedded in the request replaces `config.plan`.
    pub fn from_request(request: &ExtPlanRequest, mut config: GSFConfig) -> Result<Self> {
        if let Some(plan) = &request.config {
            config.plan = plan.clone();
        }
        config.validate()?;
        let importer = Importer::new(PlanarGeometry);
        let layout = importer.import_site(request, &config.plan)?;
        Ok(Self::new(layout, config))
    }
}

impl<G: GeometryAdapter> GSFOptimizer<G> {
    pub fn with_geometry(layout: SiteLayout, config: GSFConfig, geometry: G) -> Self {
        Self {
            layout,
            config,
            geometry,
        }
    }

    /// Runs a complete optimization. Starts from an empty layout, so repeated calls yield the same plan.
    pub fn solve(&mut self) -> Result<PlanSolution> {
        let mut budget = BudgetTracker::new(self.config.budget);
        let plan = &self.config.plan;
        self.layout.clear();

        let orientations = permitted_orientations(self.layout.land.latitude(), plan)?;
        let sizes = candidate_sizes(plan);
        if sizes.is_empty() {
            warn!("[GSF] no structure size satisfies the configured limits");
        }
        let grid = ScanGrid::new(
            &self.layout.buildable,
            &self.layout.land.projection,
            &self.config.grid,
            &self.geometry,
        );
        info!(
            "[GSF] {} orientations x {} sizes over {} grid points ({:.1} m spacing)",
            orientations.len(),
            sizes.len(),
            grid.points.len().separate_with_commas(),
            grid.spacing
        );

        let validator = CandidateValidator::new(
            &self.geometry,
            plan.gutter_width,
            plan.corridor_gap,
            self.config.corridor_tolerance,
        );

        let search = PlacementSearch {
            grid: &grid,
            orientations: &orientations,
            sizes: &sizes,
            validator,
            two_pass: self.config.two_pass,
            max_structures: plan.max_structures,
        };
        search.run(&mut self.layout, &mut budget);

        if self.config.expansion.enabled && !self.layout.is_empty() {
            expand(
                &mut self.layout,
                &validator,
                plan,
                &self.config.expansion,
                &mut budget,
            );
        }

        debug_assert!(assertions::footprints_within_land(&self.layout));
        debug_assert!(assertions::footprints_disjoint(&self.layout));

        let structures = assemble(&self.layout, plan)?;
        debug_assert!(structures.iter().all(|s| assertions::blocks_match_parent(
            s,
            (plan.block_width, plan.block_height)
        )));

        let solution = PlanSolution::new(
            structures,
            self.layout.land.area,
            budget.n_evaluations(),
            budget.elapsed(),
        );

        info!(
            "[GSF] optimization finished in {:.3}ms ({} evaluations)",
            solution.elapsed.as_secs_f64() * 1000.0,
            solution.n_evaluations.separate_with_commas()
        );
        info!(
            "[GSF] plan contains {} structures ({} blocks) with a coverage of {:.3}%",
            solution.structures.len(),
            solution.n_blocks.separate_with_commas(),
            solution.coverage * 100.0
        );
        for warning in solution.warnings.iter() {
            warn!("[GSF] {warning:?}");
        }

        Ok(solution)
    }
}
