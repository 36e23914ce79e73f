//! Job-shop scheduling solvers for makespan minimization.
//!
//! A job-shop instance is a set of jobs, each a fixed sequence of
//! operations; every operation occupies one specific machine for a fixed
//! duration, and a machine runs one operation at a time. The makespan is
//! the completion time of the last operation. This crate searches over
//! per-machine execution orders for schedules that minimize it:
//!
//! - **`instance`**: The immutable problem description, as [`Instance`]
//!   lookup tables and the [`Operation`] value type.
//! - **`encoding`**: The mutable [`ResourceOrder`] search state and its
//!   simulation into a timed [`Schedule`] by resolving the disjunctive
//!   precedence graph, with cycle detection and deterministic
//!   critical-path extraction.
//! - **`neighborhood`**: The Nowicki–Smutnicki move generator, emitting
//!   adjacent swaps at the boundaries of critical-path blocks.
//! - **`solvers`**: The [`Solver`] contract and three implementations:
//!   greedy priority dispatching, steepest-descent local search, and tabu
//!   search. The search drivers run until a local optimum or an absolute
//!   wall-clock deadline, whichever comes first.
//!
//! # Architecture
//!
//! Everything is single-threaded and synchronous. Candidate solutions are
//! always derived from deep copies of the incumbent, and infeasibility is
//! an ordinary `Option::None` outcome rather than an error.
//!
//! # References
//!
//! - Nowicki, E. & Smutnicki, C. (1996). "A Fast Taboo Search Algorithm
//!   for the Job Shop Problem", *Management Science* 42(6), 797-813.
//! - Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on
//!   Computing* 1(3), 190-206.
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 7.
//!
//! [`Instance`]: instance::Instance
//! [`Operation`]: instance::Operation
//! [`ResourceOrder`]: encoding::ResourceOrder
//! [`Schedule`]: encoding::Schedule
//! [`Solver`]: solvers::Solver

pub mod encoding;
pub mod instance;
pub mod neighborhood;
pub mod solvers;
