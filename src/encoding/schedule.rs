//! Timed schedules derived from simulating a resource order.
//!
//! A [`Schedule`] assigns every operation a start and end time. It is a
//! derived artifact: it is never stored as search state, only produced by
//! [`ResourceOrder::to_schedule`](super::ResourceOrder::to_schedule) and
//! inspected for its makespan, validity, and critical path.

use crate::instance::Operation;

/// A complete timed schedule for a job-shop instance.
///
/// Carries, per operation: start time, end time, and the predecessor that
/// determined the start time (the *critical predecessor*). The critical
/// predecessors form a deterministic backward chain from which
/// [`critical_path`](Schedule::critical_path) is extracted.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schedule {
    num_jobs: usize,
    ops_per_job: usize,
    starts: Vec<i64>,
    ends: Vec<i64>,
    critical_pred: Vec<Option<Operation>>,
    makespan: i64,
    valid: bool,
}

impl Schedule {
    pub(crate) fn new(
        num_jobs: usize,
        ops_per_job: usize,
        starts: Vec<i64>,
        ends: Vec<i64>,
        critical_pred: Vec<Option<Operation>>,
        makespan: i64,
        valid: bool,
    ) -> Self {
        Self {
            num_jobs,
            ops_per_job,
            starts,
            ends,
            critical_pred,
            makespan,
            valid,
        }
    }

    fn idx(&self, op: Operation) -> usize {
        op.job * self.ops_per_job + op.index
    }

    /// Start time of the given operation.
    pub fn start(&self, op: Operation) -> i64 {
        self.starts[self.idx(op)]
    }

    /// End (completion) time of the given operation.
    pub fn end(&self, op: Operation) -> i64 {
        self.ends[self.idx(op)]
    }

    /// Completion time of the last operation to finish.
    pub fn makespan(&self) -> i64 {
        self.makespan
    }

    /// Whether the independent consistency recheck passed.
    ///
    /// Simulation recomputes this from the timed schedule alone: no two
    /// operations on the same machine overlap, and every job executes its
    /// operations in sequence. A successful simulation always yields a
    /// valid schedule; callers still check the flag rather than trusting
    /// acyclicity alone.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The critical path: a zero-slack chain from a source operation to an
    /// operation finishing at the makespan.
    ///
    /// Extraction is deterministic: the backtrack starts at the first
    /// operation in job-major order whose end time equals the makespan and
    /// follows the critical predecessor recorded during simulation (job
    /// predecessor preferred on ties). The sum of durations along the path
    /// equals the makespan.
    pub fn critical_path(&self) -> Vec<Operation> {
        let last = (0..self.num_jobs)
            .flat_map(|job| (0..self.ops_per_job).map(move |index| Operation::new(job, index)))
            .find(|&op| self.end(op) == self.makespan);
        let Some(mut current) = last else {
            return Vec::new();
        };

        let mut path = vec![current];
        while let Some(pred) = self.critical_pred[self.idx(current)] {
            path.push(pred);
            current = pred;
        }
        path.reverse();
        path
    }
}
