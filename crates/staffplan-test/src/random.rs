//! Seeded random score instances.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use staffplan_core::{EmployeeId, Position, PositionId, ScoreRecord};

/// A random capacitated assignment instance.
#[derive(Debug, Clone)]
pub struct RandomInstance {
    pub employees: Vec<EmployeeId>,
    pub positions: Vec<Position>,
    pub records: Vec<ScoreRecord>,
}

/// Generates an instance with capacities in `0..=2`, scores in `[-10, 10)`
/// and roughly one pair in ten left without a record.
///
/// Instances are not guaranteed to be feasible.
pub fn random_instance(seed: u64, employees: usize, positions: usize) -> RandomInstance {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let employee_ids: Vec<EmployeeId> = (0..employees)
        .map(|i| EmployeeId::new(format!("E{:02}", i + 1)))
        .collect();
    let positions: Vec<Position> = (0..positions)
        .map(|j| Position::department_only(format!("D{}", j)).with_capacity(rng.random_range(0..=2)))
        .collect();

    let mut records = Vec::new();
    for id in &employee_ids {
        for j in 0..positions.len() {
            if rng.random_bool(0.1) {
                continue;
            }
            let score: f64 = rng.random_range(-10.0..10.0);
            records.push(ScoreRecord::new(id.clone(), PositionId(j), score));
        }
    }

    RandomInstance {
        employees: employee_ids,
        positions,
        records,
    }
}
