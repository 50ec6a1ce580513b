//! Staffplan Core - Core types for employee reassignment planning
//!
//! This crate provides the fundamental abstractions for staffplan:
//! - Domain types for employees and candidate positions
//! - Weight vectors and the named scoring presets
//! - Score records carrying per-term contributions
//! - Assignment plans and the aggregates derived from them

pub mod domain;
pub mod error;
pub mod plan;
pub mod score;
pub mod weights;

pub use domain::{total_capacity, Employee, EmployeeId, Position, PositionId};
pub use error::{Result, StaffplanError};
pub use plan::{
    current_department_counts, current_department_location_counts, Assignment, AssignmentPlan,
    CountTable,
};
pub use score::{round_for_display, ScoreComponents, ScoreRecord};
pub use weights::{ScoringMode, WeightVector, DESIRE_AND_DISTANCE, SKILL_AND_EVALUATION};
