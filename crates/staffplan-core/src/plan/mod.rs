//! Assignment plans and their aggregates.
//!
//! An [`AssignmentPlan`] is the output of both selectors: one [`Assignment`]
//! per employee, in selection order. Plans are plain data; callers sort,
//! filter and aggregate them for display.

use std::collections::{BTreeMap, HashMap};

use crate::domain::{Employee, EmployeeId, Position, PositionId};
use crate::error::{Result, StaffplanError};
use crate::score::{ScoreComponents, ScoreRecord};

/// Occurrence counts keyed by a display key, ordered by key.
pub type CountTable<K> = BTreeMap<K, usize>;

/// The position chosen for one employee.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    pub employee: EmployeeId,
    pub position: PositionId,
    pub score: f64,
    pub components: Option<ScoreComponents>,
}

impl From<ScoreRecord> for Assignment {
    fn from(record: ScoreRecord) -> Self {
        Self {
            employee: record.employee,
            position: record.position,
            score: record.score,
            components: record.components,
        }
    }
}

impl From<&ScoreRecord> for Assignment {
    fn from(record: &ScoreRecord) -> Self {
        record.clone().into()
    }
}

/// Mapping from employee to exactly one assignment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentPlan {
    assignments: Vec<Assignment>,
    index: HashMap<EmployeeId, usize>,
}

impl AssignmentPlan {
    /// Builds a plan, rejecting a second assignment for the same employee.
    pub fn from_assignments(assignments: Vec<Assignment>) -> Result<Self> {
        let mut index = HashMap::with_capacity(assignments.len());
        for (i, a) in assignments.iter().enumerate() {
            if index.insert(a.employee.clone(), i).is_some() {
                return Err(StaffplanError::InvalidInput(format!(
                    "employee {} assigned twice",
                    a.employee
                )));
            }
        }
        Ok(Self { assignments, index })
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Assignment> {
        self.assignments.iter()
    }

    /// Returns the assignment of one employee.
    pub fn get(&self, employee: &EmployeeId) -> Option<&Assignment> {
        self.index.get(employee).map(|&i| &self.assignments[i])
    }

    /// Sum of the selected scores.
    pub fn total_score(&self) -> f64 {
        self.assignments.iter().map(|a| a.score).sum()
    }

    /// Assignments to one position.
    pub fn for_position(&self, position: PositionId) -> impl Iterator<Item = &Assignment> {
        self.assignments
            .iter()
            .filter(move |a| a.position == position)
    }

    /// Assignments matching a predicate.
    pub fn filter<F>(&self, mut predicate: F) -> Vec<&Assignment>
    where
        F: FnMut(&Assignment) -> bool,
    {
        self.assignments.iter().filter(|a| predicate(a)).collect()
    }

    /// Reorders by descending score; equal scores keep their relative order.
    pub fn sort_by_score_desc(&mut self) {
        self.assignments
            .sort_by(|a, b| b.score.total_cmp(&a.score));
        self.reindex();
    }

    /// Reorders by employee id.
    pub fn sort_by_employee(&mut self) {
        self.assignments.sort_by(|a, b| a.employee.cmp(&b.employee));
        self.reindex();
    }

    fn reindex(&mut self) {
        self.index = self
            .assignments
            .iter()
            .enumerate()
            .map(|(i, a)| (a.employee.clone(), i))
            .collect();
    }

    /// Number of employees assigned to each position.
    pub fn position_load(&self) -> CountTable<PositionId> {
        let mut load = CountTable::new();
        for a in &self.assignments {
            *load.entry(a.position).or_insert(0) += 1;
        }
        load
    }

    /// Returns true if no position holds more employees than its capacity.
    ///
    /// Assignments to unknown positions count as violations.
    pub fn respects_capacity(&self, positions: &[Position]) -> bool {
        self.position_load().iter().all(|(id, &count)| {
            positions
                .get(id.index())
                .is_some_and(|p| count <= p.capacity as usize)
        })
    }

    /// Proposed head count per department.
    pub fn department_counts(&self, positions: &[Position]) -> Result<CountTable<String>> {
        let mut counts = CountTable::new();
        for a in &self.assignments {
            let position = resolve(positions, a.position)?;
            *counts.entry(position.department.clone()).or_insert(0) += 1;
        }
        Ok(counts)
    }

    /// Proposed head count per (department, location).
    ///
    /// Department-only positions are keyed with no location.
    pub fn department_location_counts(
        &self,
        positions: &[Position],
    ) -> Result<CountTable<(String, Option<String>)>> {
        let mut counts = CountTable::new();
        for a in &self.assignments {
            let position = resolve(positions, a.position)?;
            let key = (position.department.clone(), position.location.clone());
            *counts.entry(key).or_insert(0) += 1;
        }
        Ok(counts)
    }
}

impl<'a> IntoIterator for &'a AssignmentPlan {
    type Item = &'a Assignment;
    type IntoIter = std::slice::Iter<'a, Assignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.assignments.iter()
    }
}

fn resolve(positions: &[Position], id: PositionId) -> Result<&Position> {
    positions.get(id.index()).ok_or_else(|| {
        StaffplanError::InvalidInput(format!(
            "position {} out of range ({} positions)",
            id,
            positions.len()
        ))
    })
}

/// Current head count per department.
pub fn current_department_counts(employees: &[Employee]) -> CountTable<String> {
    let mut counts = CountTable::new();
    for e in employees {
        *counts.entry(e.current_department.clone()).or_insert(0) += 1;
    }
    counts
}

/// Current head count per (department, location).
pub fn current_department_location_counts(
    employees: &[Employee],
) -> CountTable<(String, String)> {
    let mut counts = CountTable::new();
    for e in employees {
        let key = (e.current_department.clone(), e.current_location.clone());
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}
