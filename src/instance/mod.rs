//! Job-shop problem instances.
//!
//! An instance is a rectangular matrix of operations: `num_jobs` jobs, each
//! a fixed sequence of `num_ops_per_job` operations. Every operation requires
//! one specific machine for a positive duration; machines process one
//! operation at a time.
//!
//! # Reference
//!
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 7 (Jm||C_max)

/// One unit of work belonging to a job.
///
/// Identified by its job and its position within that job's operation
/// sequence. The machine and duration are looked up from the [`Instance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Operation {
    /// Index of the job this operation belongs to.
    pub job: usize,
    /// Position of this operation within its job (0-based).
    pub index: usize,
}

impl Operation {
    /// Creates a new operation identifier.
    pub fn new(job: usize, index: usize) -> Self {
        Self { job, index }
    }
}

/// Read-only description of a job-shop problem.
///
/// Jobs are rectangular: every job has the same number of operations.
/// Durations are strictly positive integers in abstract time units.
///
/// # Examples
///
/// ```
/// use u_jobshop::instance::{Instance, Operation};
///
/// // Job 0 visits machine 0 then machine 1; job 1 the other way around.
/// let instance = Instance::new(
///     vec![vec![0, 1], vec![1, 0]],
///     vec![vec![3, 2], vec![2, 3]],
/// );
/// assert_eq!(instance.num_jobs(), 2);
/// assert_eq!(instance.num_machines(), 2);
/// assert_eq!(instance.duration(Operation::new(0, 0)), 3);
/// assert_eq!(instance.machine(Operation::new(1, 1)), 0);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instance {
    num_machines: usize,
    /// `machines[job][index]` = machine required by that operation.
    machines: Vec<Vec<usize>>,
    /// `durations[job][index]` = processing time of that operation.
    durations: Vec<Vec<i64>>,
}

impl Instance {
    /// Creates an instance from job-major machine and duration matrices.
    ///
    /// # Panics
    ///
    /// Panics if the matrices are not rectangular with identical shapes,
    /// or if any duration is not strictly positive. A malformed instance
    /// is a programmer error, not a runtime condition.
    pub fn new(machines: Vec<Vec<usize>>, durations: Vec<Vec<i64>>) -> Self {
        assert_eq!(
            machines.len(),
            durations.len(),
            "machine and duration matrices must have the same number of jobs"
        );
        let ops_per_job = machines.first().map_or(0, Vec::len);
        for (job, (m, d)) in machines.iter().zip(&durations).enumerate() {
            assert_eq!(m.len(), ops_per_job, "job {job}: ragged machine row");
            assert_eq!(d.len(), ops_per_job, "job {job}: ragged duration row");
            assert!(
                d.iter().all(|&dur| dur > 0),
                "job {job}: durations must be strictly positive"
            );
        }
        let num_machines = machines
            .iter()
            .flatten()
            .max()
            .map_or(0, |&max| max + 1);
        Self {
            num_machines,
            machines,
            durations,
        }
    }

    /// Number of jobs.
    pub fn num_jobs(&self) -> usize {
        self.machines.len()
    }

    /// Number of operations per job (identical for all jobs).
    pub fn num_ops_per_job(&self) -> usize {
        self.machines.first().map_or(0, Vec::len)
    }

    /// Number of machines.
    pub fn num_machines(&self) -> usize {
        self.num_machines
    }

    /// Total number of operations across all jobs.
    pub fn num_operations(&self) -> usize {
        self.num_jobs() * self.num_ops_per_job()
    }

    /// Machine required by the given operation.
    pub fn machine(&self, op: Operation) -> usize {
        self.machines[op.job][op.index]
    }

    /// Processing time of the given operation.
    pub fn duration(&self, op: Operation) -> i64 {
        self.durations[op.job][op.index]
    }

    /// Remaining processing time of `op`'s job, counting `op` itself and
    /// every operation after it.
    ///
    /// Used by the SRPT/LRPT dispatching rules.
    pub fn remaining_duration(&self, op: Operation) -> i64 {
        self.durations[op.job][op.index..].iter().sum()
    }

    /// Iterates over all operations in job-major order:
    /// `(0,0), (0,1), ..., (1,0), ...`.
    pub fn operations(&self) -> impl Iterator<Item = Operation> {
        let ops_per_job = self.num_ops_per_job();
        (0..self.num_jobs())
            .flat_map(move |job| (0..ops_per_job).map(move |index| Operation::new(job, index)))
    }
}
