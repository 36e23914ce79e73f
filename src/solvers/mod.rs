//! Search drivers for makespan minimization.
//!
//! Every solver satisfies the same contract: given an instance and an
//! absolute wall-clock deadline (epoch milliseconds), return the best
//! schedule found, or `None` when no feasible schedule could be produced.
//!
//! - [`GreedySolver`]: one-pass priority-rule dispatching, no search.
//! - [`DescentSolver`]: steepest-descent local search over the
//!   Nowicki–Smutnicki neighborhood.
//! - [`TabuSolver`]: the same neighborhood plus a bounded recency memory
//!   of accepted moves.
//!
//! Descent and tabu both wrap a base solver that seeds their incumbent;
//! any `Solver` works, typically a [`GreedySolver`].

mod descent;
mod greedy;
mod tabu;

pub use descent::DescentSolver;
pub use greedy::{GreedySolver, Priority};
pub use tabu::TabuSolver;

use std::time::{SystemTime, UNIX_EPOCH};

use crate::encoding::Schedule;
use crate::instance::Instance;

/// A makespan-minimization solver.
pub trait Solver {
    /// Computes a schedule for `instance`, stopping no later than the
    /// wall-clock `deadline_ms` (epoch milliseconds).
    ///
    /// A deadline already in the past still yields whatever the solver can
    /// produce without iterating (for the search drivers: the initial
    /// solution). `None` means no feasible schedule was produced.
    fn solve(&self, instance: &Instance, deadline_ms: i64) -> Option<Schedule>;
}

/// Current wall-clock time in epoch milliseconds.
pub(crate) fn epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
