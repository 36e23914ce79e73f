//! Neighborhood generation for local search.
//!
//! A neighborhood maps the current encoding to a set of candidate
//! encodings, each derived from a fresh copy; generation never mutates
//! its input. The crate ships one neighborhood, [`Nowicki`], which
//! restricts moves to the blocks of the critical path.

mod nowicki;

pub use nowicki::{Block, Nowicki, Swap};

use crate::encoding::ResourceOrder;
use crate::instance::Instance;

/// Generates candidate solutions in the vicinity of the current one.
pub trait Neighborhood {
    /// All neighbor encodings of `current`.
    ///
    /// Returns an empty list when `current` does not simulate to a
    /// feasible schedule.
    fn generate_neighbors(&self, current: &ResourceOrder, instance: &Instance)
        -> Vec<ResourceOrder>;
}
