//! Greedy priority-rule dispatching.
//!
//! Builds a resource order in one pass: keep the set of *ready* operations
//! (the next unscheduled operation of every job), repeatedly pick one by a
//! priority rule and append it to its machine's sequence. No search, no
//! backtracking; the only state is per-job and per-machine availability.
//!
//! # Reference
//!
//! Haupt (1989), "A Survey of Priority Rule-Based Scheduling",
//! *OR Spektrum* 11, 3-16.

use super::Solver;
use crate::encoding::{ResourceOrder, Schedule};
use crate::instance::{Instance, Operation};

/// Dispatch priority rules.
///
/// The `Est*` variants first restrict the ready set to operations that can
/// start earliest (the maximum of their job's and machine's availability),
/// then break ties with the base rule. Remaining ties fall to the
/// earliest-scanned candidate, so every rule is deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    /// Shortest processing time of the candidate operation.
    Spt,
    /// Longest processing time of the candidate operation.
    Lpt,
    /// Shortest remaining processing time of the candidate's job.
    Srpt,
    /// Longest remaining processing time of the candidate's job.
    Lrpt,
    /// Earliest start time, then shortest processing time.
    EstSpt,
    /// Earliest start time, then longest processing time.
    EstLpt,
    /// Earliest start time, then shortest remaining processing time.
    EstSrpt,
    /// Earliest start time, then longest remaining processing time.
    EstLrpt,
}

impl Priority {
    /// Base score of a candidate; lower wins.
    fn score(self, op: Operation, instance: &Instance) -> i64 {
        match self {
            Priority::Spt | Priority::EstSpt => instance.duration(op),
            Priority::Lpt | Priority::EstLpt => -instance.duration(op),
            Priority::Srpt | Priority::EstSrpt => instance.remaining_duration(op),
            Priority::Lrpt | Priority::EstLrpt => -instance.remaining_duration(op),
        }
    }

    fn restricts_to_earliest_start(self) -> bool {
        matches!(
            self,
            Priority::EstSpt | Priority::EstLpt | Priority::EstSrpt | Priority::EstLrpt
        )
    }
}

/// One-pass dispatching solver parameterized by a [`Priority`] rule.
///
/// Always produces a feasible encoding: operations enter the ready set in
/// job order, so the machine sequences can never contradict job
/// precedence.
#[derive(Debug, Clone, Copy)]
pub struct GreedySolver {
    priority: Priority,
}

impl GreedySolver {
    /// Creates a greedy solver using the given priority rule.
    pub fn new(priority: Priority) -> Self {
        Self { priority }
    }

    /// Selects the index of the highest-priority ready operation.
    fn select(&self, ready: &[Operation], instance: &Instance, earliest: &[i64]) -> usize {
        let mut best = 0;
        let mut best_key = self.key(ready[0], instance, earliest[0]);
        for (i, &op) in ready.iter().enumerate().skip(1) {
            let key = self.key(op, instance, earliest[i]);
            if key < best_key {
                best = i;
                best_key = key;
            }
        }
        best
    }

    fn key(&self, op: Operation, instance: &Instance, earliest_start: i64) -> (i64, i64) {
        let start = if self.priority.restricts_to_earliest_start() {
            earliest_start
        } else {
            0
        };
        (start, self.priority.score(op, instance))
    }
}

impl Solver for GreedySolver {
    fn solve(&self, instance: &Instance, _deadline_ms: i64) -> Option<Schedule> {
        let mut order = ResourceOrder::new(instance);
        let mut job_free = vec![0i64; instance.num_jobs()];
        let mut machine_free = vec![0i64; instance.num_machines()];

        let mut ready: Vec<Operation> = if instance.num_ops_per_job() == 0 {
            Vec::new()
        } else {
            (0..instance.num_jobs())
                .map(|job| Operation::new(job, 0))
                .collect()
        };

        while !ready.is_empty() {
            let earliest: Vec<i64> = ready
                .iter()
                .map(|&op| job_free[op.job].max(machine_free[instance.machine(op)]))
                .collect();
            let picked = self.select(&ready, instance, &earliest);
            let op = ready.remove(picked);

            let machine = instance.machine(op);
            let end = job_free[op.job].max(machine_free[machine]) + instance.duration(op);
            job_free[op.job] = end;
            machine_free[machine] = end;
            order.push(machine, op);

            if op.index + 1 < instance.num_ops_per_job() {
                ready.push(Operation::new(op.job, op.index + 1));
            }
        }

        order.to_schedule(instance)
    }
}
