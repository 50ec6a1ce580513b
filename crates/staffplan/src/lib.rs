//! staffplan - weighted employee reassignment planning
//!
//! Score every (employee, position) pair under a weight vector, then pick a
//! plan either greedily per employee or as the capacity-respecting optimum.
//!
//! # Example
//!
//! ```rust
//! use staffplan::prelude::*;
//!
//! let model = LinearLocationModel::reference(["L1", "L2"]);
//! let employees = vec![
//!     Employee::new("A", "Y", "L1")
//!         .with_desire("X", "L1")
//!         .with_skill(8.0)
//!         .with_evaluation(5.0)
//!         .with_tenure(3.0),
//! ];
//! let positions = vec![Position::new("X", "L1"), Position::new("Y", "L2")];
//!
//! let table = compute_scores(&employees, &positions, &WeightVector::uniform(1.0), &model).unwrap();
//! let greedy = greedy_assign(table.records()).unwrap();
//! let optimal = optimal_assign(&employees, &positions, table.records()).unwrap();
//!
//! assert_eq!(greedy.total_score(), 26.0);
//! assert_eq!(optimal, greedy);
//! ```

// Domain, weights, plans
pub use staffplan_core::{
    current_department_counts, current_department_location_counts, round_for_display,
    total_capacity, Assignment, AssignmentPlan, CountTable, Employee, EmployeeId, Position,
    PositionId, Result, ScoreComponents, ScoreRecord, ScoringMode, StaffplanError, WeightVector,
    DESIRE_AND_DISTANCE, SKILL_AND_EVALUATION,
};

// Scoring
pub use staffplan_scoring::{
    compute_scores, compute_scores_multi, CompatibilityModel, DepartmentWeights, DistanceMatrix,
    LinearLocationModel, ScoreTable, SkillMatchMatrix,
};

// Selection
pub use staffplan_solver::{
    greedy_assign, optimal_assign, AssignmentBackend, BackendKind, CapacitatedProblem,
    OptimalAssigner, SolveStats,
};

// Configuration
pub use staffplan_config::{ConfigError, StaffplanConfig};

#[cfg(feature = "console")]
pub mod console;

mod planner;
pub use planner::{Comparison, OptimalOutcome, PlanError, Planner, Proposal};

pub mod prelude {
    pub use super::{
        compute_scores, greedy_assign, optimal_assign, AssignmentPlan, BackendKind,
        CompatibilityModel, Employee, LinearLocationModel, OptimalAssigner, Planner, Position,
        ScoringMode, StaffplanConfig, StaffplanError, WeightVector,
    };
}
