use std::time::{Duration, Instant};

use log::warn;
use serde::{Deserialize, Serialize};
use thousands::Separable;

/// The clock is only consulted once every this many evaluations
const TIME_CHECK_INTERVAL: usize = 256;

/// Bounds the worst case runtime of a single run.
/// Exhausting the budget is not an error: the search ends with the structures placed so far.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct SearchBudget {
    /// Maximum number of candidates to validate
    pub max_evaluations: Option<usize>,
    /// Maximum wall-clock time (seconds)
    pub time_limit_secs: Option<f64>,
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self {
            max_evaluations: Some(10_000_000),
            time_limit_secs: Some(120.0),
        }
    }
}

/// Keeps track of the consumption of a [`SearchBudget`] during a run
#[derive(Debug, Clone)]
pub struct BudgetTracker {
    budget: SearchBudget,
    start: Instant,
    n_evaluations: usize,
    exhausted: bool,
}

impl BudgetTracker {
    pub fn new(budget: SearchBudget) -> Self {
        Self {
            budget,
            start: Instant::now(),
            n_evaluations: 0,
            exhausted: false,
        }
    }

    pub fn register_evaluation(&mut self) {
        self.n_evaluations += 1;
    }

    /// Once exhausted, a tracker stays exhausted
    pub fn is_exhausted(&mut self) -> bool {
        if !self.exhausted {
            let evals_spent = self
                .budget
                .max_evaluations
                .is_some_and(|max| self.n_evaluations >= max);
            let time_spent = self.n_evaluations % TIME_CHECK_INTERVAL == 0
                && self
                    .budget
                    .time_limit_secs
                    .is_some_and(|limit| self.elapsed().as_secs_f64() >= limit);

            if evals_spent || time_spent {
                warn!(
                    "[SEARCH] budget exhausted after {} evaluations and {:.3}s, keeping what was placed so far",
                    self.n_evaluations.separate_with_commas(),
                    self.elapsed().as_secs_f64()
                );
                self.exhausted = true;
            }
        }
        self.exhausted
    }

    pub fn n_evaluations(&self) -> usize {
        self.n_evaluations
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
