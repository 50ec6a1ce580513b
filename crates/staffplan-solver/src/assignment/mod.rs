//! Capacitated assignment primitive.
//!
//! A [`CapacitatedProblem`] has `rows` items to place and a set of columns,
//! each accepting at most `capacity` rows. Each (row, column) pair is either
//! admissible with a finite weight or not admissible at all. A solution
//! places every row in exactly one admissible column and maximizes the summed
//! weight.
//!
//! Backends implement [`AssignmentBackend`] and are interchangeable: every
//! backend returns an optimum, so totals agree across backends even when the
//! chosen columns differ on ties.

mod flow;
mod hungarian;
mod linear;

#[cfg(test)]
mod tests;

use std::fmt::Debug;

use staffplan_config::BackendKind;
use staffplan_core::{Result, StaffplanError};

use crate::stats::SolveStats;
use crate::termination::Deadline;

pub use flow::MinCostFlow;
pub use hungarian::Hungarian;
pub use linear::LinearProgram;

/// Dense capacitated assignment instance.
///
/// # Examples
///
/// ```
/// use staffplan_solver::{AssignmentBackend, CapacitatedProblem, Deadline, Hungarian, SolveStats};
///
/// let weights = [[4.0, 1.0], [3.0, 0.0], [5.0, 3.0]];
/// let problem = CapacitatedProblem::from_fn(3, vec![2, 1], |r, c| Some(weights[r][c])).unwrap();
///
/// let columns = Hungarian
///     .solve(&problem, &Deadline::unlimited(), &mut SolveStats::default())
///     .unwrap();
/// assert_eq!(problem.verify(&columns).unwrap(), 10.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CapacitatedProblem {
    rows: usize,
    capacities: Vec<u32>,
    weights: Vec<Option<f64>>,
}

impl CapacitatedProblem {
    /// Creates an instance with no admissible pairs.
    pub fn new(rows: usize, capacities: Vec<u32>) -> Self {
        let weights = vec![None; rows * capacities.len()];
        Self {
            rows,
            capacities,
            weights,
        }
    }

    /// Creates an instance from a weight function; `None` marks an
    /// inadmissible pair.
    pub fn from_fn<F>(rows: usize, capacities: Vec<u32>, mut weight: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> Option<f64>,
    {
        let mut problem = Self::new(rows, capacities);
        for row in 0..rows {
            for column in 0..problem.columns() {
                if let Some(w) = weight(row, column) {
                    problem.set_weight(row, column, w)?;
                }
            }
        }
        Ok(problem)
    }

    /// Makes a pair admissible with the given weight.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an out-of-range pair or a non-finite weight.
    pub fn set_weight(&mut self, row: usize, column: usize, weight: f64) -> Result<()> {
        if row >= self.rows || column >= self.columns() {
            return Err(StaffplanError::InvalidInput(format!(
                "pair ({}, {}) outside a {}x{} problem",
                row,
                column,
                self.rows,
                self.columns()
            )));
        }
        if !weight.is_finite() {
            return Err(StaffplanError::InvalidInput(format!(
                "non-finite weight {} for pair ({}, {})",
                weight, row, column
            )));
        }
        let cell = row * self.columns() + column;
        self.weights[cell] = Some(weight);
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.capacities.len()
    }

    pub fn capacities(&self) -> &[u32] {
        &self.capacities
    }

    /// Weight of a pair, `None` if inadmissible or out of range.
    pub fn weight(&self, row: usize, column: usize) -> Option<f64> {
        if column >= self.columns() {
            return None;
        }
        self.weights.get(row * self.columns() + column).copied().flatten()
    }

    pub fn admissible_edges(&self) -> usize {
        self.weights.iter().filter(|w| w.is_some()).count()
    }

    pub fn total_capacity(&self) -> u64 {
        self.capacities.iter().map(|&c| u64::from(c)).sum()
    }

    /// Capacity a backend can usefully expand: no column holds more than all rows.
    pub(crate) fn effective_capacity(&self, column: usize) -> usize {
        (self.capacities[column] as usize).min(self.rows)
    }

    /// Rejects instances that obviously have no complete assignment.
    ///
    /// Catches total capacity below the row count and rows without any
    /// admissible column of positive capacity. Passing this check does not
    /// guarantee feasibility; backends report the remaining cases.
    pub fn check_feasible(&self) -> Result<()> {
        let capacity = self.total_capacity();
        if capacity < self.rows as u64 {
            return Err(StaffplanError::Infeasible(format!(
                "{} rows but total capacity {}",
                self.rows, capacity
            )));
        }
        for row in 0..self.rows {
            let placeable = (0..self.columns())
                .any(|c| self.capacities[c] > 0 && self.weight(row, c).is_some());
            if !placeable {
                return Err(StaffplanError::Infeasible(format!(
                    "row {} has no admissible column with capacity",
                    row
                )));
            }
        }
        Ok(())
    }

    /// Checks a backend answer and returns its total weight.
    ///
    /// # Errors
    ///
    /// `SolverFailure` if a row is missing, uses an inadmissible pair or a
    /// column is over capacity.
    pub fn verify(&self, columns: &[usize]) -> Result<f64> {
        if columns.len() != self.rows {
            return Err(StaffplanError::SolverFailure(format!(
                "backend placed {} of {} rows",
                columns.len(),
                self.rows
            )));
        }
        let mut load = vec![0u32; self.columns()];
        let mut total = 0.0;
        for (row, &column) in columns.iter().enumerate() {
            let Some(w) = self.weight(row, column) else {
                return Err(StaffplanError::SolverFailure(format!(
                    "backend placed row {} on inadmissible column {}",
                    row, column
                )));
            };
            load[column] += 1;
            if load[column] > self.capacities[column] {
                return Err(StaffplanError::SolverFailure(format!(
                    "backend exceeded capacity {} of column {}",
                    self.capacities[column], column
                )));
            }
            total += w;
        }
        Ok(total)
    }
}

/// Exact solver for a [`CapacitatedProblem`].
pub trait AssignmentBackend: Send + Sync + Debug {
    /// Backend name for logs.
    fn name(&self) -> &'static str;

    /// Returns the chosen column for every row.
    ///
    /// # Errors
    ///
    /// `Infeasible` when no complete assignment exists, `Timeout` when the
    /// deadline passes mid-solve.
    fn solve(
        &self,
        problem: &CapacitatedProblem,
        deadline: &Deadline,
        stats: &mut SolveStats,
    ) -> Result<Vec<usize>>;
}

/// Returns the backend selected by configuration.
pub fn backend_for(kind: BackendKind) -> Box<dyn AssignmentBackend> {
    match kind {
        BackendKind::Hungarian => Box::new(Hungarian),
        BackendKind::MinCostFlow => Box::new(MinCostFlow),
        BackendKind::LinearProgram => Box::new(LinearProgram),
    }
}
