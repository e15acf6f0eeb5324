use itertools::Itertools;
use log::{debug, info};
use polyplan::entities::{Candidate, PlanConfig, SiteLayout};
use polyplan::geometry::GeometryAdapter;
use serde::{Deserialize, Serialize};

use crate::opt::budget::BudgetTracker;
use crate::opt::sizes::size_within_limits;
use crate::opt::validator::CandidateValidator;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ExpansionConfig {
    pub enabled: bool,
    /// Number of passes over all structures. With more than one round, the pass is repeated
    /// until no structure grows anymore or the rounds run out.
    pub rounds: usize,
    /// Maximum number of bays added along each axis
    pub max_extra_bays: usize,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rounds: 1,
            max_extra_bays: 4,
        }
    }
}

/// Grows placed structures by whole bays into free space around them, keeping center and rotation.
/// Structures are handled in placement order: each one is validated against the current
/// (possibly already grown) footprints of all others.
/// Returns the number of times a structure was enlarged.
pub fn expand<G: GeometryAdapter>(
    layout: &mut SiteLayout,
    validator: &CandidateValidator<G>,
    plan: &PlanConfig,
    config: &ExpansionConfig,
    budget: &mut BudgetTracker,
) -> usize {
    let extra_bays = (0..=config.max_extra_bays)
        .cartesian_product(0..=config.max_extra_bays)
        .filter(|&extra| extra != (0, 0))
        .collect_vec();

    let mut n_grown_total = 0;
    for round in 0..config.rounds {
        let mut n_grown = 0;
        for key in layout.keys().to_vec() {
            if budget.is_exhausted() {
                return n_grown_total + n_grown;
            }
            let Some(current) = layout.placement(key).copied() else {
                continue;
            };

            let enlargements = extra_bays
                .iter()
                .map(|&extra| Candidate {
                    size: current
                        .size
                        .extended(extra, plan.block_width, plan.block_height),
                    ..current
                })
                .filter(|c| size_within_limits(&c.size, plan));

            //on equal area, the first enlargement in (gable, gutter) order is kept
            let mut best: Option<(Candidate, _)> = None;
            for c in enlargements {
                if budget.is_exhausted() {
                    break;
                }
                budget.register_evaluation();
                if let Ok(footprint) = validator.validate(layout, &c, Some(key)) {
                    if best.as_ref().is_none_or(|(b, _)| c.area() > b.area()) {
                        best = Some((c, footprint));
                    }
                }
            }

            if let Some((enlarged, footprint)) = best {
                debug!(
                    "[EXPAND] grew {:.0} x {:.0} m to {:.0} x {:.0} m at [{}]",
                    current.size.gable,
                    current.size.gutter,
                    enlarged.size.gable,
                    enlarged.size.gutter,
                    enlarged.d_transformation()
                );
                layout.replace(key, enlarged, footprint);
                n_grown += 1;
            }
        }

        info!(
            "[EXPAND] round {} grew {n_grown} structure(s), coverage: {:.3}%",
            round + 1,
            layout.coverage() * 100.0
        );
        n_grown_total += n_grown;
        if n_grown == 0 {
            break;
        }
    }
    n_grown_total
}
