//! The resource-order encoding and its simulation into a timed schedule.

use std::collections::VecDeque;

use rand::Rng;

use super::schedule::Schedule;
use crate::instance::{Instance, Operation};

/// Per-machine execution orders: the primary mutable search state.
///
/// For every machine, an ordered sequence of the operations assigned to it.
/// A complete encoding holds every operation of the instance exactly once,
/// each in its own machine's sequence. `Clone` produces a deep, independent
/// copy; candidate solutions are always derived from a clone, never by
/// mutating a shared encoding.
///
/// An encoding fixes the machine-order half of the disjunctive graph. It is
/// not necessarily feasible: an arbitrary per-machine order may contradict
/// job order transitively, which [`to_schedule`](ResourceOrder::to_schedule)
/// reports as `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceOrder {
    /// `sequences[m]` = execution order of the operations on machine `m`.
    sequences: Vec<Vec<Operation>>,
}

impl ResourceOrder {
    /// Creates an empty encoding with one sequence per machine.
    ///
    /// Dispatchers fill it with [`push`](ResourceOrder::push).
    pub fn new(instance: &Instance) -> Self {
        Self {
            sequences: vec![Vec::with_capacity(instance.num_jobs()); instance.num_machines()],
        }
    }

    /// Rebuilds an encoding from a timed schedule by ordering each
    /// machine's operations by start time.
    pub fn from_schedule(schedule: &Schedule, instance: &Instance) -> Self {
        let mut order = Self::new(instance);
        for op in instance.operations() {
            order.sequences[instance.machine(op)].push(op);
        }
        for seq in &mut order.sequences {
            seq.sort_by_key(|&op| schedule.start(op));
        }
        order
    }

    /// Creates a random feasible encoding by dispatching a uniformly random
    /// ready operation until every operation is placed.
    ///
    /// Reproducible for a fixed RNG seed. Useful as a cheap baseline
    /// solution and for randomized tests.
    pub fn random<R: Rng>(instance: &Instance, rng: &mut R) -> Self {
        let mut order = Self::new(instance);
        let mut ready: Vec<Operation> = if instance.num_ops_per_job() == 0 {
            Vec::new()
        } else {
            (0..instance.num_jobs())
                .map(|job| Operation::new(job, 0))
                .collect()
        };
        while !ready.is_empty() {
            let op = ready.swap_remove(rng.random_range(0..ready.len()));
            order.push(instance.machine(op), op);
            if op.index + 1 < instance.num_ops_per_job() {
                ready.push(Operation::new(op.job, op.index + 1));
            }
        }
        order
    }

    /// Number of machine sequences.
    pub fn num_machines(&self) -> usize {
        self.sequences.len()
    }

    /// The execution order of the given machine.
    pub fn sequence(&self, machine: usize) -> &[Operation] {
        &self.sequences[machine]
    }

    /// Appends an operation to the end of a machine's sequence.
    pub fn push(&mut self, machine: usize, op: Operation) {
        self.sequences[machine].push(op);
    }

    /// Position of `op` in `machine`'s sequence, if present.
    pub fn index_of(&self, machine: usize, op: Operation) -> Option<usize> {
        self.sequences[machine].iter().position(|&o| o == op)
    }

    /// Exchanges the operations at positions `t1` and `t2` of `machine`'s
    /// sequence. All other sequences are untouched.
    pub fn swap(&mut self, machine: usize, t1: usize, t2: usize) {
        self.sequences[machine].swap(t1, t2);
    }

    /// Whether this encoding holds exactly the instance's operations:
    /// every operation appears once, in the sequence of its own machine.
    pub fn is_complete(&self, instance: &Instance) -> bool {
        if self.sequences.len() != instance.num_machines() {
            return false;
        }
        let mut seen = vec![false; instance.num_operations()];
        let ops_per_job = instance.num_ops_per_job();
        for (machine, seq) in self.sequences.iter().enumerate() {
            for &op in seq {
                if op.job >= instance.num_jobs()
                    || op.index >= ops_per_job
                    || instance.machine(op) != machine
                {
                    return false;
                }
                let idx = op.job * ops_per_job + op.index;
                if seen[idx] {
                    return false;
                }
                seen[idx] = true;
            }
        }
        seen.into_iter().all(|s| s)
    }

    /// Simulates this encoding into a timed [`Schedule`].
    ///
    /// Resolves the disjunctive precedence graph (job-order edges plus the
    /// machine-order edges this encoding induces) by topological
    /// evaluation: an operation starts at the later of its job
    /// predecessor's and machine predecessor's end times, and runs for its
    /// duration. The predecessor achieving that start is recorded for
    /// critical-path extraction; on a tie the job predecessor wins.
    ///
    /// Returns `None` when the graph is cyclic: the encoding orders some
    /// machine against the job order it transitively depends on. Callers
    /// treat `None` as "reject this candidate", never as a fatal error.
    pub fn to_schedule(&self, instance: &Instance) -> Option<Schedule> {
        let num_jobs = instance.num_jobs();
        let ops_per_job = instance.num_ops_per_job();
        let total = instance.num_operations();
        let idx = |op: Operation| op.job * ops_per_job + op.index;

        // Machine-order edges induced by the sequences.
        let mut machine_pred: Vec<Option<Operation>> = vec![None; total];
        let mut machine_succ: Vec<Option<Operation>> = vec![None; total];
        for seq in &self.sequences {
            for pair in seq.windows(2) {
                machine_succ[idx(pair[0])] = Some(pair[1]);
                machine_pred[idx(pair[1])] = Some(pair[0]);
            }
        }

        let mut unresolved_preds: Vec<u8> = vec![0; total];
        for op in instance.operations() {
            let mut preds = 0;
            if op.index > 0 {
                preds += 1;
            }
            if machine_pred[idx(op)].is_some() {
                preds += 1;
            }
            unresolved_preds[idx(op)] = preds;
        }

        let mut starts = vec![0i64; total];
        let mut ends = vec![0i64; total];
        let mut critical_pred: Vec<Option<Operation>> = vec![None; total];

        let mut queue: VecDeque<Operation> = instance
            .operations()
            .filter(|&op| unresolved_preds[idx(op)] == 0)
            .collect();
        let mut resolved = 0;

        while let Some(op) = queue.pop_front() {
            let i = idx(op);

            // Durations are positive, so any predecessor forces a start
            // strictly after 0; keeping the job predecessor on ties fixes
            // the critical-path extraction.
            let mut start = 0;
            let mut pred = None;
            if op.index > 0 {
                let job_pred = Operation::new(op.job, op.index - 1);
                start = ends[idx(job_pred)];
                pred = Some(job_pred);
            }
            if let Some(mp) = machine_pred[i] {
                if ends[idx(mp)] > start {
                    start = ends[idx(mp)];
                    pred = Some(mp);
                }
            }

            starts[i] = start;
            ends[i] = start + instance.duration(op);
            critical_pred[i] = pred;
            resolved += 1;

            if op.index + 1 < ops_per_job {
                let succ = Operation::new(op.job, op.index + 1);
                unresolved_preds[idx(succ)] -= 1;
                if unresolved_preds[idx(succ)] == 0 {
                    queue.push_back(succ);
                }
            }
            if let Some(succ) = machine_succ[i] {
                unresolved_preds[idx(succ)] -= 1;
                if unresolved_preds[idx(succ)] == 0 {
                    queue.push_back(succ);
                }
            }
        }

        if resolved < total {
            // Some operations never lost all their unresolved predecessors:
            // the precedence graph is cyclic, the encoding infeasible.
            return None;
        }

        let makespan = ends.iter().copied().max().unwrap_or(0);
        let valid = self.check_consistency(instance, &starts, &ends);
        Some(Schedule::new(
            num_jobs,
            ops_per_job,
            starts,
            ends,
            critical_pred,
            makespan,
            valid,
        ))
    }

    /// Independent recheck of the timed schedule, trusting only the start
    /// and end times: job order holds, and no two operations on the same
    /// machine overlap.
    fn check_consistency(&self, instance: &Instance, starts: &[i64], ends: &[i64]) -> bool {
        let ops_per_job = instance.num_ops_per_job();
        let idx = |op: Operation| op.job * ops_per_job + op.index;

        for op in instance.operations() {
            if op.index > 0 {
                let job_pred = Operation::new(op.job, op.index - 1);
                if starts[idx(op)] < ends[idx(job_pred)] {
                    return false;
                }
            }
        }

        // Machine membership comes from the instance, never from this
        // encoding's sequences.
        for machine in 0..instance.num_machines() {
            let mut on_machine: Vec<Operation> = instance
                .operations()
                .filter(|&op| instance.machine(op) == machine)
                .collect();
            on_machine.sort_by_key(|&op| starts[idx(op)]);
            for pair in on_machine.windows(2) {
                if starts[idx(pair[1])] < ends[idx(pair[0])] {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn two_job_instance() -> Instance {
        Instance::new(
            vec![vec![0, 1], vec![1, 0]],
            vec![vec![3, 2], vec![2, 3]],
        )
    }

    /// job 0 first on both machines; simulates to makespan 10.
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
    fn test_simulate_two_job_instance() {
        let instance = two_job_instance();
        let order = job0_first_order();
        let schedule = order.to_schedule(&instance).expect("feasible encoding");

        assert_eq!(schedule.start(Operation::new(0, 0)), 0);
        assert_eq!(schedule.end(Operation::new(0, 0)), 3);
        assert_eq!(schedule.start(Operation::new(0, 1)), 3);
        assert_eq!(schedule.start(Operation::new(1, 0)), 5);
        assert_eq!(schedule.start(Operation::new(1, 1)), 7);
        assert_eq!(schedule.makespan(), 10);
        assert!(schedule.is_valid());
    }

    #[test]
    fn test_simulate_detects_cycle() {
        let instance = two_job_instance();
        let mut order = ResourceOrder::new(&instance);
        // (1,1) before (0,0) on machine 0, but (1,1) transitively needs
        // (1,0), which waits for (0,1), which waits for (0,0).
        order.push(0, Operation::new(1, 1));
        order.push(0, Operation::new(0, 0));
        order.push(1, Operation::new(0, 1));
        order.push(1, Operation::new(1, 0));

        assert!(
            order.to_schedule(&instance).is_none(),
            "cyclic encoding must simulate to None"
        );
    }

    #[test]
    fn test_simulate_is_deterministic() {
        let instance = two_job_instance();
        let order = job0_first_order();
        let a = order.to_schedule(&instance).unwrap();
        let b = order.to_schedule(&instance).unwrap();

        for op in instance.operations() {
            assert_eq!(a.start(op), b.start(op));
            assert_eq!(a.end(op), b.end(op));
        }
        assert_eq!(a.critical_path(), b.critical_path());
    }

    #[test]
    fn test_critical_path_two_job_instance() {
        let instance = two_job_instance();
        let order = job0_first_order();
        let schedule = order.to_schedule(&instance).unwrap();

        assert_eq!(
            schedule.critical_path(),
            vec![
                Operation::new(0, 0),
                Operation::new(0, 1),
                Operation::new(1, 0),
                Operation::new(1, 1),
            ]
        );
    }

    #[test]
    fn test_critical_path_durations_sum_to_makespan() {
        let instance = two_job_instance();
        let order = job0_first_order();
        let schedule = order.to_schedule(&instance).unwrap();

        let total: i64 = schedule
            .critical_path()
            .iter()
            .map(|&op| instance.duration(op))
            .sum();
        assert_eq!(
            total,
            schedule.makespan(),
            "zero-slack path durations must sum to the makespan"
        );
    }

    #[test]
    fn test_from_schedule_round_trip() {
        let instance = two_job_instance();
        let order = job0_first_order();
        let schedule = order.to_schedule(&instance).unwrap();

        let rebuilt = ResourceOrder::from_schedule(&schedule, &instance);
        assert_eq!(rebuilt, order);
    }

    #[test]
    fn test_swap_is_self_inverse() {
        let order = job0_first_order();

        let mut swapped = order.clone();
        swapped.swap(1, 0, 1);
        assert_ne!(swapped, order);
        swapped.swap(1, 0, 1);
        assert_eq!(swapped, order);
    }

    #[test]
    fn test_clone_is_deep() {
        let order = job0_first_order();
        let mut copy = order.clone();
        copy.swap(0, 0, 1);

        assert_eq!(order.sequence(0)[0], Operation::new(0, 0));
        assert_eq!(copy.sequence(0)[0], Operation::new(1, 1));
    }

    #[test]
    fn test_random_is_complete_and_feasible() {
        let instance = two_job_instance();
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..20 {
            let order = ResourceOrder::random(&instance, &mut rng);
            assert!(order.is_complete(&instance));
            let schedule = order
                .to_schedule(&instance)
                .expect("ready-dispatch orders are always feasible");
            assert!(schedule.is_valid());
        }
    }

    #[test]
    fn test_random_reproducible_for_fixed_seed() {
        let instance = two_job_instance();
        let a = ResourceOrder::random(&instance, &mut SmallRng::seed_from_u64(7));
        let b = ResourceOrder::random(&instance, &mut SmallRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_is_complete_rejects_missing_and_duplicate() {
        let instance = two_job_instance();
        let mut order = ResourceOrder::new(&instance);
        assert!(!order.is_complete(&instance));

        order.push(0, Operation::new(0, 0));
        order.push(0, Operation::new(0, 0));
        order.push(1, Operation::new(0, 1));
        order.push(1, Operation::new(1, 0));
        assert!(!order.is_complete(&instance), "duplicate operation");
    }

    // Randomized instances: machine assignments drawn per operation, so
    // jobs may revisit a machine and some machines may sit idle.
    fn arb_instance() -> impl Strategy<Value = Instance> {
        (1usize..5, 1usize..5, 1usize..4).prop_flat_map(|(jobs, ops, machines)| {
            (
                proptest::collection::vec(
                    proptest::collection::vec(0..machines, ops..=ops),
                    jobs..=jobs,
                ),
                proptest::collection::vec(
                    proptest::collection::vec(1i64..10, ops..=ops),
                    jobs..=jobs,
                ),
            )
                .prop_map(|(m, d)| Instance::new(m, d))
        })
    }

    proptest! {
        #[test]
        fn prop_random_orders_simulate_valid(
            instance in arb_instance(),
            seed in any::<u64>(),
        ) {
            let mut rng = SmallRng::seed_from_u64(seed);
            let order = ResourceOrder::random(&instance, &mut rng);
            prop_assert!(order.is_complete(&instance));

            let schedule = order.to_schedule(&instance).expect("dispatch order is acyclic");
            prop_assert!(schedule.is_valid());

            let total: i64 = schedule
                .critical_path()
                .iter()
                .map(|&op| instance.duration(op))
                .sum();
            prop_assert_eq!(total, schedule.makespan());
        }

        #[test]
        fn prop_swap_preserves_machine_contents(
            instance in arb_instance(),
            seed in any::<u64>(),
            t1 in any::<usize>(),
            t2 in any::<usize>(),
        ) {
            let mut rng = SmallRng::seed_from_u64(seed);
            let order = ResourceOrder::random(&instance, &mut rng);

            let machine = seed as usize % instance.num_machines().max(1);
            let len = order.sequence(machine).len();
            prop_assume!(len >= 2);
            let (t1, t2) = (t1 % len, t2 % len);

            let mut swapped = order.clone();
            swapped.swap(machine, t1, t2);
            prop_assert!(swapped.is_complete(&instance));

            // Same multiset on every machine, order aside.
            for m in 0..instance.num_machines() {
                let mut a = order.sequence(m).to_vec();
                let mut b = swapped.sequence(m).to_vec();
                a.sort();
                b.sort();
                prop_assert_eq!(a, b);
            }

            swapped.swap(machine, t1, t2);
            prop_assert_eq!(swapped, order);
        }
    }
}
