//! Tabu search over the Nowicki–Smutnicki neighborhood.
//!
//! Keeps a bounded FIFO list of the most recently accepted swaps; swaps on
//! the list are excluded from the candidate set for as long as they remain
//! queued. Acceptance still requires a strict improvement over the best
//! schedule found so far; the list guards against immediately re-applying
//! a recent move, it does not admit worsening moves. Canonical tabu search
//! (Glover 1989) walks through non-improving neighbors to escape local
//! optima; this variant deliberately reproduces the stricter
//! best-so-far acceptance, so its termination behavior matches descent.
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Nowicki, E. & Smutnicki, C. (1996). "A Fast Taboo Search Algorithm for
//!   the Job Shop Problem", *Management Science* 42(6), 797-813.

use std::collections::VecDeque;

use super::{epoch_ms, Solver};
use crate::encoding::{ResourceOrder, Schedule};
use crate::instance::Instance;
use crate::neighborhood::{Nowicki, Swap};

/// Number of accepted swaps remembered by default.
const DEFAULT_TENURE: usize = 10;

/// Tabu search seeded by a base solver.
#[derive(Debug, Clone, Copy)]
pub struct TabuSolver<S> {
    base: S,
    tenure: usize,
}

impl<S> TabuSolver<S> {
    /// Creates a tabu solver seeded by `base`, remembering the 10 most
    /// recently accepted swaps.
    pub fn new(base: S) -> Self {
        Self {
            base,
            tenure: DEFAULT_TENURE,
        }
    }

    /// Sets how many accepted swaps stay tabu.
    pub fn with_tenure(mut self, tenure: usize) -> Self {
        self.tenure = tenure;
        self
    }
}

impl<S: Solver> Solver for TabuSolver<S> {
    fn solve(&self, instance: &Instance, deadline_ms: i64) -> Option<Schedule> {
        let initial = self.base.solve(instance, deadline_ms)?;
        let mut best_order = ResourceOrder::from_schedule(&initial, instance);
        let mut best_schedule = best_order.to_schedule(instance)?;
        let mut best_makespan = best_schedule.makespan();

        let mut tabu: VecDeque<Swap> = VecDeque::with_capacity(self.tenure + 1);

        let mut accepted = true;
        while accepted && epoch_ms() < deadline_ms {
            accepted = false;

            // All candidates of a round apply to the incumbent as it stood
            // when the round started.
            let mut round_best: Option<(Swap, ResourceOrder, Schedule)> = None;
            let mut round_makespan = best_makespan;
            for swap in Nowicki::all_swaps(&best_order, instance) {
                if tabu.contains(&swap) {
                    continue;
                }
                let candidate = swap.apply_to(&best_order);
                let Some(schedule) = candidate.to_schedule(instance) else {
                    continue;
                };
                if !schedule.is_valid() {
                    continue;
                }
                if schedule.makespan() < round_makespan {
                    round_makespan = schedule.makespan();
                    round_best = Some((swap, candidate, schedule));
                }
            }

            if let Some((swap, order, schedule)) = round_best {
                best_order = order;
                best_schedule = schedule;
                best_makespan = round_makespan;

                tabu.push_back(swap);
                if tabu.len() > self.tenure {
                    tabu.pop_front();
                }
                accepted = true;
            }
        }

        Some(best_schedule)
    }
}
