//! Binary integer program.
//!
//! One binary variable `x[r][c]` per admissible pair, maximizing
//! `sum(weight * x)` subject to `sum_c x[r][c] == 1` for every row and
//! `sum_r x[r][c] <= capacity[c]` for every column. The constraint matrix is
//! totally unimodular, so the relaxation is already integral; the variables
//! are still declared binary.

use good_lp::solvers::microlp::microlp;
use good_lp::{
    constraint, variable, variables, Expression, ResolutionError, Solution, SolverModel, Variable,
};
use staffplan_core::{Result, StaffplanError};
use tracing::debug;

use super::{AssignmentBackend, CapacitatedProblem};
use crate::stats::SolveStats;
use crate::termination::Deadline;

/// Values above this count as a chosen pair.
const SELECTED: f64 = 0.5;

/// `good_lp` backend on the pure-Rust `microlp` solver.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearProgram;

impl AssignmentBackend for LinearProgram {
    fn name(&self) -> &'static str {
        "linear_program"
    }

    fn solve(
        &self,
        problem: &CapacitatedProblem,
        deadline: &Deadline,
        stats: &mut SolveStats,
    ) -> Result<Vec<usize>> {
        problem.check_feasible()?;
        deadline.check()?;

        let rows = problem.rows();
        if rows == 0 {
            return Ok(Vec::new());
        }

        let mut vars = variables!();
        let mut pairs: Vec<(usize, usize, Variable)> = Vec::with_capacity(problem.admissible_edges());
        let mut objective = Expression::default();
        let mut row_sums = vec![Expression::default(); rows];
        let mut column_sums = vec![Expression::default(); problem.columns()];

        for r in 0..rows {
            for c in 0..problem.columns() {
                if let Some(w) = problem.weight(r, c) {
                    let x = vars.add(variable().binary());
                    objective.add_mul(w, x);
                    row_sums[r].add_mul(1.0, x);
                    column_sums[c].add_mul(1.0, x);
                    pairs.push((r, c, x));
                }
            }
        }
        debug!(variables = pairs.len(), rows, columns = problem.columns(), "Built integer program");

        let mut model = vars.maximise(objective).using(microlp);
        for row in row_sums {
            model = model.with(constraint!(row == 1.0));
        }
        for (column, sum) in column_sums.into_iter().enumerate() {
            let capacity = f64::from(problem.capacities()[column]);
            model = model.with(constraint!(sum <= capacity));
        }

        let solution = model.solve().map_err(|e| match e {
            ResolutionError::Infeasible => {
                StaffplanError::Infeasible("no complete assignment satisfies the capacities".to_string())
            }
            other => StaffplanError::SolverFailure(format!("integer program: {}", other)),
        })?;
        deadline.check()?;

        let mut columns = vec![None; rows];
        for &(r, c, x) in &pairs {
            if solution.value(x) > SELECTED {
                if columns[r].is_some() {
                    return Err(StaffplanError::SolverFailure(format!(
                        "integer program placed row {} twice",
                        r
                    )));
                }
                columns[r] = Some(c);
                stats.record_augmentation();
            }
        }
        stats.record_relaxations(pairs.len() as u64);

        columns
            .into_iter()
            .enumerate()
            .map(|(r, c)| {
                c.ok_or_else(|| {
                    StaffplanError::SolverFailure(format!("integer program left row {} unplaced", r))
                })
            })
            .collect()
    }
}
