//! Steepest-descent local search.
//!
//! Each round simulates every Nowicki–Smutnicki neighbor of the incumbent,
//! discards infeasible or invalid candidates, and accepts the best one iff
//! it strictly improves the incumbent's makespan. The search stops at the
//! first round that accepts nothing (a local optimum in the swap move
//! class) or when the wall-clock deadline passes. Ties between equally
//! good neighbors fall to the one generated first.
//!
//! Because every accepted move strictly decreases a non-negative integer
//! makespan, descent terminates even without a deadline.

use super::{epoch_ms, Solver};
use crate::encoding::{ResourceOrder, Schedule};
use crate::instance::Instance;
use crate::neighborhood::{Neighborhood, Nowicki};

/// Best-improvement descent over the Nowicki–Smutnicki neighborhood.
///
/// Wraps a base solver that provides the initial solution.
#[derive(Debug, Clone, Copy)]
pub struct DescentSolver<S> {
    base: S,
}

impl<S> DescentSolver<S> {
    /// Creates a descent solver seeded by `base`.
    pub fn new(base: S) -> Self {
        Self { base }
    }
}

impl<S: Solver> Solver for DescentSolver<S> {
    fn solve(&self, instance: &Instance, deadline_ms: i64) -> Option<Schedule> {
        let initial = self.base.solve(instance, deadline_ms)?;
        let mut best_order = ResourceOrder::from_schedule(&initial, instance);
        let mut best_schedule = best_order.to_schedule(instance)?;
        let mut best_makespan = best_schedule.makespan();

        let mut accepted = true;
        while accepted && epoch_ms() < deadline_ms {
            accepted = false;

            let mut round_best: Option<(ResourceOrder, Schedule)> = None;
            let mut round_makespan = i64::MAX;
            for neighbor in Nowicki.generate_neighbors(&best_order, instance) {
                let Some(schedule) = neighbor.to_schedule(instance) else {
                    continue;
                };
                if !schedule.is_valid() {
                    continue;
                }
                if schedule.makespan() < round_makespan {
                    round_makespan = schedule.makespan();
                    round_best = Some((neighbor, schedule));
                }
            }

            if let Some((order, schedule)) = round_best {
                if round_makespan < best_makespan {
                    best_order = order;
                    best_schedule = schedule;
                    best_makespan = round_makespan;
                    accepted = true;
                }
            }
        }

        Some(best_schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Operation;
    use crate::solvers::{GreedySolver, Priority};

    /// Test solver handing out a fixed encoding's schedule.
    struct FixedOrder(ResourceOrder);

    impl Solver for FixedOrder {
        fn solve(&self, instance: &Instance, _deadline_ms: i64) -> Option<Schedule> {
            self.0.to_schedule(instance)
        }
    }

    fn two_job_instance() -> Instance {
        Instance::new(
            vec![vec![0, 1], vec![1, 0]],
            vec![vec![3, 2], vec![2, 3]],
        )
    }

    fn job0_first_order() -> ResourceOrder {
        let instance = two_job_instance();
        let mut order = ResourceOrder::new(&instance);
        order.push(0, Operation::new(0, 0));
        order.push(0, Operation::new(1, 1));
        order.push(1, Operation::new(0, 1));
        order.push(1, Operation::new(1, 0));
        order
    }

    #[test]
    fn test_descent_improves_to_local_optimum() {
        let instance = two_job_instance();
        let solver = DescentSolver::new(FixedOrder(job0_first_order()));

        let schedule = solver.solve(&instance, i64::MAX).expect("feasible");
        assert!(schedule.is_valid());
        assert!(
            schedule.makespan() <= 8,
            "descent must improve the makespan-10 seed, got {}",
            schedule.makespan()
        );
        // The single critical block swap reaches this instance's optimum.
        assert_eq!(schedule.makespan(), 6);
    }

    #[test]
    fn test_expired_deadline_returns_initial_solution() {
        let instance = two_job_instance();
        let solver = DescentSolver::new(FixedOrder(job0_first_order()));

        let schedule = solver.solve(&instance, 0).expect("feasible");
        assert_eq!(
            schedule.makespan(),
            10,
            "no improvement rounds may run after the deadline"
        );
    }

    #[test]
    fn test_infeasible_base_solution_propagates() {
        let instance = two_job_instance();
        let mut order = ResourceOrder::new(&instance);
        order.push(0, Operation::new(1, 1));
        order.push(0, Operation::new(0, 0));
        order.push(1, Operation::new(0, 1));
        order.push(1, Operation::new(1, 0));

        let solver = DescentSolver::new(FixedOrder(order));
        assert!(solver.solve(&instance, i64::MAX).is_none());
    }

    #[test]
    fn test_descent_never_worse_than_greedy_seed() {
        let instance = Instance::new(
            vec![vec![0, 1, 2], vec![0, 2, 1], vec![1, 2, 0]],
            vec![vec![3, 2, 2], vec![2, 1, 4], vec![4, 3, 1]],
        );
        for rule in [Priority::Spt, Priority::Lrpt, Priority::EstLrpt] {
            let greedy = GreedySolver::new(rule);
            let seed_makespan = greedy.solve(&instance, i64::MAX).unwrap().makespan();
            let improved = DescentSolver::new(greedy)
                .solve(&instance, i64::MAX)
                .unwrap();
            assert!(improved.is_valid());
            assert!(
                improved.makespan() <= seed_makespan,
                "{rule:?}: descent returned {} from seed {}",
                improved.makespan(),
                seed_makespan
            );
        }
    }
}
