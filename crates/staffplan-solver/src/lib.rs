//! staffplan assignment engine
//!
//! This crate turns score records into assignment plans:
//! - Greedy per-employee selection (score-and-rank mode)
//! - The capacitated assignment primitive and its exact backends
//! - The constrained-optimal assigner built on that primitive
//! - Time limits and solve statistics

pub mod assignment;
pub mod greedy;
pub mod optimal;
pub mod stats;
pub mod termination;

pub use assignment::{
    backend_for, AssignmentBackend, CapacitatedProblem, Hungarian, LinearProgram, MinCostFlow,
};
pub use greedy::greedy_assign;
pub use optimal::{optimal_assign, OptimalAssigner};
pub use staffplan_config::BackendKind;
pub use stats::SolveStats;
pub use termination::Deadline;
