//! The Nowicki–Smutnicki critical-path-block neighborhood.
//!
//! The critical path of a feasible schedule is partitioned into *blocks*:
//! maximal runs of consecutive critical operations that share a machine
//! and sit next to each other in that machine's sequence. Only swaps at
//! block boundaries can shorten the makespan, so the neighborhood emits,
//! per block, the swap of the first two and the swap of the last two
//! positions (one swap for a two-operation block). This keeps the
//! neighborhood O(critical-path length) while remaining sufficient for
//! descent to a local optimum in the swap move class.
//!
//! # Reference
//!
//! Nowicki, E. & Smutnicki, C. (1996). "A Fast Taboo Search Algorithm for
//! the Job Shop Problem", *Management Science* 42(6), 797-813.

use super::Neighborhood;
use crate::encoding::ResourceOrder;
use crate::instance::Instance;

/// A maximal run of critical-path operations on one machine.
///
/// `first` and `last` are positions in that machine's sequence,
/// `last > first`; the run covers every position in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    /// Machine the block lies on.
    pub machine: usize,
    /// Position of the block's first operation in the machine's sequence.
    pub first: usize,
    /// Position of the block's last operation in the machine's sequence.
    pub last: usize,
}

/// An exchange of the operations at two positions of one machine's
/// sequence.
///
/// Positions are normalized at construction (`t1 < t2`); two swaps are
/// equal iff machine and both normalized positions match. Applying a swap
/// twice restores the original encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Swap {
    machine: usize,
    t1: usize,
    t2: usize,
}

impl Swap {
    /// Creates a swap of positions `a` and `b` on `machine`'s sequence.
    pub fn new(machine: usize, a: usize, b: usize) -> Self {
        let (t1, t2) = if a < b { (a, b) } else { (b, a) };
        Self { machine, t1, t2 }
    }

    /// Machine the swap applies to.
    pub fn machine(&self) -> usize {
        self.machine
    }

    /// The earlier of the two positions.
    pub fn t1(&self) -> usize {
        self.t1
    }

    /// The later of the two positions.
    pub fn t2(&self) -> usize {
        self.t2
    }

    /// Returns a new encoding with the swap applied. The original is not
    /// modified.
    pub fn apply_to(&self, original: &ResourceOrder) -> ResourceOrder {
        let mut order = original.clone();
        order.swap(self.machine, self.t1, self.t2);
        order
    }
}

/// The Nowicki–Smutnicki neighborhood generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Nowicki;

impl Nowicki {
    /// Partitions the critical path of `order`'s schedule into blocks.
    ///
    /// A new block starts whenever the machine changes or the operations
    /// stop being adjacent in the machine's sequence; runs of a single
    /// operation are dropped. Returns an empty list when `order` is
    /// infeasible.
    pub fn blocks_of_critical_path(order: &ResourceOrder, instance: &Instance) -> Vec<Block> {
        let Some(schedule) = order.to_schedule(instance) else {
            return Vec::new();
        };

        let mut blocks = Vec::new();
        // (machine, first position, previous position) of the open run.
        let mut run: Option<(usize, usize, usize)> = None;

        for &op in &schedule.critical_path() {
            let machine = instance.machine(op);
            let pos = order
                .index_of(machine, op)
                .expect("critical operation missing from its machine sequence");

            match run {
                Some((m, first, prev)) if m == machine && pos == prev + 1 => {
                    run = Some((m, first, pos));
                }
                _ => {
                    if let Some((m, first, prev)) = run {
                        if prev > first {
                            blocks.push(Block {
                                machine: m,
                                first,
                                last: prev,
                            });
                        }
                    }
                    run = Some((machine, pos, pos));
                }
            }
        }
        if let Some((m, first, prev)) = run {
            if prev > first {
                blocks.push(Block {
                    machine: m,
                    first,
                    last: prev,
                });
            }
        }
        blocks
    }

    /// All swaps of the Nowicki–Smutnicki neighborhood for `order`.
    pub fn all_swaps(order: &ResourceOrder, instance: &Instance) -> Vec<Swap> {
        Self::blocks_of_critical_path(order, instance)
            .iter()
            .flat_map(|block| Self::block_swaps(block))
            .collect()
    }

    /// The one or two swaps a block contributes: its first two positions
    /// and its last two positions.
    fn block_swaps(block: &Block) -> Vec<Swap> {
        if block.last == block.first + 1 {
            vec![Swap::new(block.machine, block.first, block.last)]
        } else {
            vec![
                Swap::new(block.machine, block.first, block.first + 1),
                Swap::new(block.machine, block.last - 1, block.last),
            ]
        }
    }
}

impl Neighborhood for Nowicki {
    fn generate_neighbors(
        &self,
        current: &ResourceOrder,
        instance: &Instance,
    ) -> Vec<ResourceOrder> {
        Self::all_swaps(current, instance)
            .iter()
            .map(|swap| swap.apply_to(current))
            .collect()
    }
}
