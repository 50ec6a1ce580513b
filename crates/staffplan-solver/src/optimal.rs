//! Constrained-optimal assignment.
//!
//! Maps employees, positions and score records onto a
//! [`CapacitatedProblem`], solves it with the configured backend, verifies
//! the answer and projects it back into an [`AssignmentPlan`].

use std::collections::HashMap;
use std::time::Duration;

use staffplan_config::{BackendKind, SolverConfig};
use staffplan_core::{
    total_capacity, Assignment, AssignmentPlan, EmployeeId, Position, Result, ScoreRecord,
    StaffplanError,
};
use tracing::{debug, info};

use crate::assignment::{backend_for, CapacitatedProblem};
use crate::stats::SolveStats;
use crate::termination::Deadline;

/// Solves with the default backend and no time limit.
///
/// Employees are assigned exactly once, positions receive at most their
/// capacity, and the summed score is maximal. Pairs without a score record
/// are never assigned.
///
/// # Errors
///
/// - `InvalidInput` for duplicate employees, records naming unknown
///   employees or positions, duplicate or non-finite records
/// - `Infeasible` when no complete assignment exists
/// - `SolverFailure` when the backend answer fails verification
///
/// # Examples
///
/// ```
/// use staffplan_core::{EmployeeId, Position, PositionId, ScoreRecord};
/// use staffplan_solver::{greedy_assign, optimal_assign};
///
/// let employees = [EmployeeId::from("A"), EmployeeId::from("B")];
/// let positions = Position::departments(&["X", "Y"]);
/// let records = vec![
///     ScoreRecord::new("A", PositionId(0), 10.0),
///     ScoreRecord::new("A", PositionId(1), 9.0),
///     ScoreRecord::new("B", PositionId(0), 10.0),
///     ScoreRecord::new("B", PositionId(1), 1.0),
/// ];
///
/// // greedy puts both on X
/// assert_eq!(greedy_assign(&records).unwrap().total_score(), 20.0);
///
/// let plan = optimal_assign(&employees, &positions, &records).unwrap();
/// assert_eq!(plan.total_score(), 19.0);
/// assert!(plan.respects_capacity(&positions));
/// ```
pub fn optimal_assign<E>(
    employees: &[E],
    positions: &[Position],
    records: &[ScoreRecord],
) -> Result<AssignmentPlan>
where
    E: AsRef<EmployeeId>,
{
    OptimalAssigner::new().solve(employees, positions, records)
}

/// Optimal assignment with a chosen backend and time limit.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use staffplan_solver::{BackendKind, OptimalAssigner};
///
/// let assigner = OptimalAssigner::new()
///     .with_backend(BackendKind::MinCostFlow)
///     .with_time_limit(Duration::from_secs(5));
/// assert_eq!(assigner.backend(), BackendKind::MinCostFlow);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptimalAssigner {
    backend: BackendKind,
    time_limit: Option<Duration>,
}

impl OptimalAssigner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an assigner from the `[solver]` configuration section.
    pub fn from_config(config: &SolverConfig) -> Self {
        Self {
            backend: config.backend,
            time_limit: config.time_limit(),
        }
    }

    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn backend(&self) -> BackendKind {
        self.backend
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    /// Solves and returns only the plan.
    pub fn solve<E>(
        &self,
        employees: &[E],
        positions: &[Position],
        records: &[ScoreRecord],
    ) -> Result<AssignmentPlan>
    where
        E: AsRef<EmployeeId>,
    {
        self.solve_with_stats(employees, positions, records)
            .map(|(plan, _)| plan)
    }

    /// Solves and returns the plan with solve statistics.
    pub fn solve_with_stats<E>(
        &self,
        employees: &[E],
        positions: &[Position],
        records: &[ScoreRecord],
    ) -> Result<(AssignmentPlan, SolveStats)>
    where
        E: AsRef<EmployeeId>,
    {
        let deadline = Deadline::from_limit(self.time_limit);
        let mut stats = SolveStats::default();
        stats.start();

        let rows = row_index(employees)?;
        let capacity = total_capacity(positions);
        if capacity < employees.len() as u64 {
            return Err(StaffplanError::Infeasible(format!(
                "{} employees but total capacity {}",
                employees.len(),
                capacity
            )));
        }

        let capacities: Vec<u32> = positions.iter().map(|p| p.capacity).collect();
        let mut problem = CapacitatedProblem::new(employees.len(), capacities);
        let mut chosen: Vec<Option<&ScoreRecord>> = vec![None; employees.len() * positions.len()];

        for record in records {
            let row = *rows.get(&record.employee).ok_or_else(|| {
                StaffplanError::InvalidInput(format!(
                    "score record for unknown employee {}",
                    record.employee
                ))
            })?;
            let column = record.position.index();
            if column >= positions.len() {
                return Err(StaffplanError::InvalidInput(format!(
                    "score record for unknown position {}",
                    record.position
                )));
            }
            let cell = &mut chosen[row * positions.len() + column];
            if cell.is_some() {
                return Err(StaffplanError::InvalidInput(format!(
                    "duplicate score record for {} at {}",
                    record.employee, record.position
                )));
            }
            problem.set_weight(row, column, record.score)?;
            *cell = Some(record);
        }

        let stranded = (0..employees.len()).find(|&row| {
            (0..positions.len())
                .all(|column| positions[column].capacity == 0 || problem.weight(row, column).is_none())
        });
        if let Some(row) = stranded {
            return Err(StaffplanError::Infeasible(format!(
                "employee {} has no admissible position with capacity",
                employees[row].as_ref()
            )));
        }

        stats.rows = problem.rows();
        stats.columns = problem.columns();
        stats.admissible_edges = problem.admissible_edges();

        let backend = backend_for(self.backend);
        info!(
            event = "solve_start",
            backend = backend.name(),
            employees = stats.rows,
            positions = stats.columns,
            admissible_edges = stats.admissible_edges,
        );

        deadline.check()?;
        let columns = backend.solve(&problem, &deadline, &mut stats)?;
        let total = problem.verify(&columns)?;
        debug!(backend = backend.name(), total, "Verified backend answer");

        let assignments = columns
            .iter()
            .enumerate()
            .map(|(row, &column)| {
                chosen[row * positions.len() + column]
                    .map(Assignment::from)
                    .ok_or_else(|| {
                        StaffplanError::SolverFailure(format!(
                            "backend placed row {} on a pair without a record",
                            row
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        let plan = AssignmentPlan::from_assignments(assignments)?;
        stats.finish();

        info!(
            event = "solve_end",
            backend = backend.name(),
            total_score = plan.total_score(),
            augmentations = stats.augmentations,
            elapsed_ms = stats.elapsed().as_millis() as u64,
        );
        Ok((plan, stats))
    }
}

fn row_index<E>(employees: &[E]) -> Result<HashMap<&EmployeeId, usize>>
where
    E: AsRef<EmployeeId>,
{
    let mut rows = HashMap::with_capacity(employees.len());
    for (row, employee) in employees.iter().enumerate() {
        let id = employee.as_ref();
        if rows.insert(id, row).is_some() {
            return Err(StaffplanError::InvalidInput(format!(
                "duplicate employee id {}",
                id
            )));
        }
    }
    Ok(rows)
}

#[cfg(test)]
#[path = "optimal_tests.rs"]
mod tests;
