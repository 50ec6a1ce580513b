//! Kuhn-Munkres with row and column potentials.
//!
//! Each column is expanded into one slot per unit of capacity, which turns
//! the capacitated problem into a rectangular assignment of rows to slots
//! (rows <= slots). Weights are negated into costs and minimized.

use staffplan_core::{Result, StaffplanError};
use tracing::{debug, trace};

use super::{AssignmentBackend, CapacitatedProblem};
use crate::stats::SolveStats;
use crate::termination::Deadline;

/// Hungarian backend over capacity-expanded slots.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hungarian;

impl AssignmentBackend for Hungarian {
    fn name(&self) -> &'static str {
        "hungarian"
    }

    fn solve(
        &self,
        problem: &CapacitatedProblem,
        deadline: &Deadline,
        stats: &mut SolveStats,
    ) -> Result<Vec<usize>> {
        problem.check_feasible()?;

        let n = problem.rows();
        let slot_column: Vec<usize> = (0..problem.columns())
            .flat_map(|c| std::iter::repeat(c).take(problem.effective_capacity(c)))
            .collect();
        let m = slot_column.len();
        debug!(rows = n, slots = m, "Expanded columns into slots");

        let cost = |row: usize, slot: usize| -> f64 {
            problem
                .weight(row, slot_column[slot])
                .map_or(f64::INFINITY, |w| -w)
        };

        // 1-indexed; index 0 is the virtual start of each augmenting search
        let mut u = vec![0.0f64; n + 1];
        let mut v = vec![0.0f64; m + 1];
        let mut p = vec![0usize; m + 1];
        let mut way = vec![0usize; m + 1];

        for i in 1..=n {
            deadline.check()?;
            p[0] = i;
            let mut j0 = 0;
            let mut minv = vec![f64::INFINITY; m + 1];
            let mut used = vec![false; m + 1];

            loop {
                used[j0] = true;
                let i0 = p[j0];
                let mut delta = f64::INFINITY;
                let mut j1 = 0;
                for j in 1..=m {
                    if used[j] {
                        continue;
                    }
                    let cur = cost(i0 - 1, j - 1) - u[i0] - v[j];
                    if cur < minv[j] {
                        minv[j] = cur;
                        way[j] = j0;
                    }
                    if minv[j] < delta {
                        delta = minv[j];
                        j1 = j;
                    }
                }
                stats.record_relaxations(m as u64);

                if !delta.is_finite() {
                    return Err(StaffplanError::Infeasible(format!(
                        "row {} cannot be placed without displacing another row",
                        i - 1
                    )));
                }

                for j in 0..=m {
                    if used[j] {
                        u[p[j]] += delta;
                        v[j] -= delta;
                    } else {
                        minv[j] -= delta;
                    }
                }
                j0 = j1;
                if p[j0] == 0 {
                    break;
                }
            }

            loop {
                let j1 = way[j0];
                p[j0] = p[j1];
                j0 = j1;
                if j0 == 0 {
                    break;
                }
            }
            stats.record_augmentation();
            trace!(row = i - 1, "Augmented");
        }

        let mut columns = vec![usize::MAX; n];
        for j in 1..=m {
            if p[j] != 0 {
                columns[p[j] - 1] = slot_column[j - 1];
            }
        }
        if columns.iter().any(|&c| c == usize::MAX) {
            return Err(StaffplanError::SolverFailure(
                "hungarian search left a row unmatched".to_string(),
            ));
        }
        Ok(columns)
    }
}
