//! Score-and-rank selection.
//!
//! Each employee independently takes their best-scoring position. There is
//! no cross-employee constraint, so this is an approximation of the
//! capacitated optimum: several employees may pile onto one position.

use std::collections::HashMap;

use staffplan_core::{Assignment, AssignmentPlan, EmployeeId, Result, ScoreRecord, StaffplanError};
use tracing::{debug, info};

/// Picks the maximum-score record for every employee.
///
/// Employees appear in the plan in order of their first record. Ties
/// resolve to the earliest record.
///
/// # Errors
///
/// `InvalidInput` if any record score is NaN or infinite.
///
/// # Examples
///
/// ```
/// use staffplan_core::{PositionId, ScoreRecord};
/// use staffplan_solver::greedy_assign;
///
/// let records = vec![
///     ScoreRecord::new("A", PositionId(0), 3.0),
///     ScoreRecord::new("A", PositionId(1), 7.0),
///     ScoreRecord::new("B", PositionId(0), 2.0),
///     ScoreRecord::new("B", PositionId(1), 2.0),
/// ];
/// let plan = greedy_assign(&records).unwrap();
///
/// assert_eq!(plan.get(&"A".into()).unwrap().position, PositionId(1));
/// // tie goes to the first record
/// assert_eq!(plan.get(&"B".into()).unwrap().position, PositionId(0));
/// assert_eq!(plan.total_score(), 9.0);
/// ```
pub fn greedy_assign(records: &[ScoreRecord]) -> Result<AssignmentPlan> {
    let mut best: Vec<&ScoreRecord> = Vec::new();
    let mut slot: HashMap<&EmployeeId, usize> = HashMap::new();

    for record in records {
        if !record.score.is_finite() {
            return Err(StaffplanError::InvalidInput(format!(
                "non-finite score {} for {} at {}",
                record.score, record.employee, record.position
            )));
        }
        match slot.get(&record.employee) {
            Some(&i) => {
                if record.score > best[i].score {
                    best[i] = record;
                }
            }
            None => {
                slot.insert(&record.employee, best.len());
                best.push(record);
            }
        }
    }

    for record in &best {
        debug!(
            employee = %record.employee,
            position = %record.position,
            score = record.score,
            "Selected"
        );
    }

    let plan = AssignmentPlan::from_assignments(best.into_iter().map(Assignment::from).collect())?;
    info!(
        event = "greedy_end",
        employees = plan.len(),
        records = records.len(),
        total_score = plan.total_score(),
    );
    Ok(plan)
}
