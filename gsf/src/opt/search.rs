use itertools::Itertools;
use log::{debug, info, trace};
use polyplan::entities::{Candidate, CandidateSize, SiteLayout};
use polyplan::geometry::GeometryAdapter;
use polyplan::geometry::primitives::Point;
use serde::{Deserialize, Serialize};
use thousands::Separable;

use crate::opt::budget::BudgetTracker;
use crate::opt::grid::ScanGrid;
use crate::opt::validator::CandidateValidator;

/// Settings of the two-pass variant, used for land which can hold many large structures
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct TwoPassConfig {
    pub enabled: bool,
    /// Two passes are used when the land area is at least this multiple of the largest footprint
    pub capacity_factor: f64,
    /// The first pass only uses sizes with at least this fraction of the largest inner area
    pub large_size_fraction: f64,
    /// The second pass only runs while the coverage is below this ratio
    pub coverage_target: f64,
    /// Maximum number of structures placed by the second pass
    pub max_gap_fillers: usize,
}

impl Default for TwoPassConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity_factor: 4.0,
            large_size_fraction: 0.7,
            coverage_target: 0.85,
            max_gap_fillers: 50,
        }
    }
}

/// Greedy scan of the grid: at every point the first valid (orientation, size) combination is placed.
/// Orientations are tried in the outer loop, sizes (largest first) in the inner loop.
/// This gives no guarantee of maximum coverage, it trades optimality for a bounded runtime.
pub struct PlacementSearch<'a, G: GeometryAdapter> {
    pub grid: &'a ScanGrid,
    pub orientations: &'a [f64],
    /// Sorted by descending area
    pub sizes: &'a [CandidateSize],
    pub validator: CandidateValidator<'a, G>,
    pub two_pass: TwoPassConfig,
    /// Upper bound on the total number of structures in the layout
    pub max_structures: Option<usize>,
}

impl<G: GeometryAdapter> PlacementSearch<'_, G> {
    /// Fills the layout, returns the number of structures placed
    pub fn run(&self, layout: &mut SiteLayout, budget: &mut BudgetTracker) -> usize {
        let Some(largest) = self.sizes.first() else {
            return 0;
        };
        let largest_footprint = self
            .sizes
            .iter()
            .map(|s| Candidate::new(*s, 0.0, Point(0.0, 0.0)))
            .map(|c| c.footprint_area(self.validator.gutter_width))
            .fold(0.0, f64::max);

        let high_capacity = self.two_pass.enabled
            && layout.land.area >= self.two_pass.capacity_factor * largest_footprint;

        if !high_capacity {
            let n_placed = self.scan(layout, self.sizes, self.remaining(layout), budget);
            info!("[SEARCH] single pass placed {n_placed} structure(s)");
            return n_placed;
        }

        let area_threshold = self.two_pass.large_size_fraction * largest.area();
        let (large, small): (Vec<CandidateSize>, Vec<CandidateSize>) = self
            .sizes
            .iter()
            .partition(|s| s.area() >= area_threshold);

        let n_first = self.scan(layout, &large, self.remaining(layout), budget);
        info!(
            "[SEARCH] first pass placed {n_first} structure(s) using {} large sizes, coverage: {:.3}%",
            large.len(),
            layout.coverage() * 100.0
        );

        let coverage = layout.coverage();
        if coverage >= self.two_pass.coverage_target || small.is_empty() {
            debug!("[SEARCH] second pass skipped (coverage: {:.3}%)", coverage * 100.0);
            return n_first;
        }

        let max_fillers = match self.remaining(layout) {
            Some(remaining) => remaining.min(self.two_pass.max_gap_fillers),
            None => self.two_pass.max_gap_fillers,
        };
        let n_second = self.scan(layout, &small, Some(max_fillers), budget);
        info!(
            "[SEARCH] second pass placed {n_second} gap filler(s), coverage: {:.3}%",
            layout.coverage() * 100.0
        );

        n_first + n_second
    }

    fn remaining(&self, layout: &SiteLayout) -> Option<usize> {
        self.max_structures
            .map(|max| max.saturating_sub(layout.n_placed()))
    }

    /// Single pass over the grid with the given sizes, placing at most `max_new` structures
    fn scan(
        &self,
        layout: &mut SiteLayout,
        sizes: &[CandidateSize],
        max_new: Option<usize>,
        budget: &mut BudgetTracker,
    ) -> usize {
        let mut n_placed = 0;
        let evals_before = budget.n_evaluations();

        'grid: for point in self.grid.points.iter() {
            if max_new.is_some_and(|max| n_placed >= max) || budget.is_exhausted() {
                break 'grid;
            }
            if layout.occupied().covers(point) {
                continue;
            }
            for (&rotation, size) in self.orientations.iter().cartesian_product(sizes) {
                if budget.is_exhausted() {
                    break 'grid;
                }
                budget.register_evaluation();
                let candidate = Candidate::new(*size, rotation, *point);
                match self.validator.validate(layout, &candidate, None) {
                    Ok(footprint) => {
                        layout.place(candidate, footprint);
                        n_placed += 1;
                        debug!(
                            "[SEARCH] placed #{} ({:.0} x {:.0} m) at [{}]",
                            layout.n_placed(),
                            size.gable,
                            size.gutter,
                            candidate.d_transformation()
                        );
                        //first valid wins, move on to the next point
                        continue 'grid;
                    }
                    Err(rejection) => {
                        trace!("[SEARCH] rejected {candidate:?}: {rejection:?}");
                    }
                }
            }
        }

        debug!(
            "[SEARCH] scan over {} points finished after {} evaluations",
            self.grid.points.len(),
            (budget.n_evaluations() - evals_before).separate_with_commas()
        );
        n_placed
    }
}
