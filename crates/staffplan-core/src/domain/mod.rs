//! Domain model for reassignment planning
//!
//! - `Employee`: an immutable roster entry for one planning run
//! - `Position`: a candidate (department, location) seat with a capacity
//!
//! Positions are addressed by their index in generation order (`PositionId`),
//! which is also the tie-break order used by the greedy selector.

mod employee;
mod position;

pub use employee::{Employee, EmployeeId};
pub use position::{total_capacity, Position, PositionId};

#[cfg(test)]
mod tests;
