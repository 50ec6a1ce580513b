//! Exhaustive reference solver for capacitated assignment.
//!
//! Enumerates every assignment of rows to columns that respects column
//! capacities. Only suitable for tiny instances.

use std::collections::HashMap;

use staffplan_core::{EmployeeId, Position, PositionId, ScoreRecord};

/// Best assignment found by enumeration.
#[derive(Debug, Clone, PartialEq)]
pub struct BruteForceOptimum {
    pub total: f64,
    /// Column chosen for each row.
    pub columns: Vec<usize>,
}

/// Finds the maximum-total assignment, or `None` if no complete assignment exists.
///
/// `weight(row, column)` returns `None` for pairs that may not be assigned.
pub fn brute_force_best<F>(rows: usize, capacities: &[u32], weight: F) -> Option<BruteForceOptimum>
where
    F: Fn(usize, usize) -> Option<f64>,
{
    let mut remaining: Vec<u32> = capacities.to_vec();
    let mut current = Vec::with_capacity(rows);
    let mut best: Option<BruteForceOptimum> = None;
    search(rows, &weight, &mut remaining, &mut current, 0.0, &mut best);
    best
}

fn search<F>(
    rows: usize,
    weight: &F,
    remaining: &mut [u32],
    current: &mut Vec<usize>,
    total: f64,
    best: &mut Option<BruteForceOptimum>,
) where
    F: Fn(usize, usize) -> Option<f64>,
{
    let row = current.len();
    if row == rows {
        if best.as_ref().map_or(true, |b| total > b.total) {
            *best = Some(BruteForceOptimum {
                total,
                columns: current.clone(),
            });
        }
        return;
    }
    for column in 0..remaining.len() {
        if remaining[column] == 0 {
            continue;
        }
        let Some(w) = weight(row, column) else {
            continue;
        };
        remaining[column] -= 1;
        current.push(column);
        search(rows, weight, remaining, current, total + w, best);
        current.pop();
        remaining[column] += 1;
    }
}

/// Runs [`brute_force_best`] over score records.
pub fn brute_force_records(
    employees: &[EmployeeId],
    positions: &[Position],
    records: &[ScoreRecord],
) -> Option<BruteForceOptimum> {
    let lookup: HashMap<(&EmployeeId, PositionId), f64> = records
        .iter()
        .map(|r| ((&r.employee, r.position), r.score))
        .collect();
    let capacities: Vec<u32> = positions.iter().map(|p| p.capacity).collect();
    brute_force_best(employees.len(), &capacities, |row, column| {
        lookup.get(&(&employees[row], PositionId(column))).copied()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picks_best_permutation() {
        let w = [[1.0, 5.0, 3.0], [4.0, 6.0, 2.0], [3.0, 1.0, 9.0]];
        let best = brute_force_best(3, &[1, 1, 1], |r, c| Some(w[r][c])).unwrap();
        assert_eq!(best.columns, vec![1, 0, 2]);
        assert_eq!(best.total, 18.0);
    }

    #[test]
    fn test_infeasible() {
        assert!(brute_force_best(3, &[1, 1], |_, _| Some(1.0)).is_none());
        assert!(brute_force_best(1, &[1], |_, _| None).is_none());
    }

    #[test]
    fn test_capacity_shared() {
        let best = brute_force_best(2, &[2, 0], |_, c| Some(c as f64 + 1.0)).unwrap();
        assert_eq!(best.columns, vec![0, 0]);
    }
}
