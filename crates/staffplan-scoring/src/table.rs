//! Score tables: every (employee, position) record for one weight vector.

use std::collections::HashSet;

use staffplan_core::{
    Employee, EmployeeId, Position, PositionId, Result, ScoreRecord, StaffplanError, WeightVector,
};
use tracing::debug;

use crate::compatibility::CompatibilityModel;
use crate::scorer::{pair_signals, weigh, PairSignals};

/// Score records in generation order: employee-major, then position order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreTable {
    records: Vec<ScoreRecord>,
}

impl ScoreTable {
    /// Wraps externally produced records, rejecting duplicate pairs and
    /// non-finite scores.
    pub fn from_records(records: Vec<ScoreRecord>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for r in &records {
            if !r.score.is_finite() {
                return Err(StaffplanError::InvalidInput(format!(
                    "non-finite score for {} at {}",
                    r.employee, r.position
                )));
            }
            if !seen.insert((&r.employee, r.position)) {
                return Err(StaffplanError::InvalidInput(format!(
                    "duplicate score record for {} at {}",
                    r.employee, r.position
                )));
            }
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ScoreRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records of one employee, in position order.
    pub fn for_employee<'a>(&'a self, employee: &'a EmployeeId) -> impl Iterator<Item = &'a ScoreRecord> {
        self.records.iter().filter(move |r| &r.employee == employee)
    }

    /// The record for one pair.
    pub fn get(&self, employee: &EmployeeId, position: PositionId) -> Option<&ScoreRecord> {
        self.records
            .iter()
            .find(|r| &r.employee == employee && r.position == position)
    }
}

impl AsRef<[ScoreRecord]> for ScoreTable {
    fn as_ref(&self) -> &[ScoreRecord] {
        &self.records
    }
}

impl IntoIterator for ScoreTable {
    type Item = ScoreRecord;
    type IntoIter = std::vec::IntoIter<ScoreRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

/// Scores every (employee, position) pair under one weight vector.
///
/// # Errors
///
/// `InvalidWeight`, `InvalidInput` (non-finite attribute, duplicate
/// employee id or a weighted score overflowing to infinity) and
/// `InvalidLocation` are returned as soon as they occur.
pub fn compute_scores<C>(
    employees: &[Employee],
    positions: &[Position],
    weights: &WeightVector,
    model: &C,
) -> Result<ScoreTable>
where
    C: CompatibilityModel + ?Sized,
{
    let mut tables = compute_scores_multi(employees, positions, std::slice::from_ref(weights), model)?;
    Ok(tables.pop().unwrap_or_default())
}

/// Scores every pair under several weight vectors in one lookup pass.
///
/// Returns one table per weight vector, in input order.
pub fn compute_scores_multi<C>(
    employees: &[Employee],
    positions: &[Position],
    weights: &[WeightVector],
    model: &C,
) -> Result<Vec<ScoreTable>>
where
    C: CompatibilityModel + ?Sized,
{
    for w in weights {
        w.validate()?;
    }
    check_roster(employees)?;

    let pairs = employees.len() * positions.len();
    let mut tables: Vec<Vec<ScoreRecord>> =
        weights.iter().map(|_| Vec::with_capacity(pairs)).collect();

    for employee in employees {
        for (index, position) in positions.iter().enumerate() {
            let signals: PairSignals = pair_signals(employee, position, model)?;
            for (records, w) in tables.iter_mut().zip(weights) {
                let components = weigh(employee, signals, w);
                if !components.total().is_finite() {
                    return Err(StaffplanError::InvalidInput(format!(
                        "score of employee {} for {} overflows: {}",
                        employee.id,
                        position.label(),
                        components.total()
                    )));
                }
                records.push(ScoreRecord::from_components(
                    employee.id.clone(),
                    PositionId(index),
                    components,
                ));
            }
        }
    }

    debug!(
        employees = employees.len(),
        positions = positions.len(),
        weight_vectors = weights.len(),
        "Computed score tables"
    );

    Ok(tables
        .into_iter()
        .map(|records| ScoreTable { records })
        .collect())
}

fn check_roster(employees: &[Employee]) -> Result<()> {
    let mut seen = HashSet::with_capacity(employees.len());
    for e in employees {
        e.validate()?;
        if !seen.insert(&e.id) {
            return Err(StaffplanError::InvalidInput(format!(
                "duplicate employee id {}",
                e.id
            )));
        }
    }
    Ok(())
}
