//! Rosters: loaded from JSON or generated from a seed.

use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use staffplan::{Employee, StaffplanError};

use crate::error::CliError;

/// Loads a JSON array of employees.
pub fn load_roster(path: &Path) -> Result<Vec<Employee>, CliError> {
    let contents = std::fs::read_to_string(path)?;
    let employees: Vec<Employee> = serde_json::from_str(&contents)?;
    for e in &employees {
        e.validate()?;
    }
    Ok(employees)
}

/// Generates `count` employees named `E01`, `E02`, ...
///
/// Skill is drawn from 1-10, evaluation from 1-5, tenure from 1-20 years
/// and age from 23-60. Current and desired department and location are
/// drawn independently and uniformly from the taxonomy.
pub fn synthetic_roster(
    count: usize,
    seed: u64,
    departments: &[String],
    locations: &[String],
) -> Result<Vec<Employee>, StaffplanError> {
    if departments.is_empty() || locations.is_empty() {
        return Err(StaffplanError::InvalidInput(
            "synthetic roster needs at least one department and one location".to_string(),
        ));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let width = count.to_string().len().max(2);
    let employees = (1..=count)
        .map(|i| {
            let department = &departments[rng.random_range(0..departments.len())];
            let location = &locations[rng.random_range(0..locations.len())];
            let desired_department = &departments[rng.random_range(0..departments.len())];
            let desired_location = &locations[rng.random_range(0..locations.len())];
            Employee::new(format!("E{:0width$}", i), department.as_str(), location.as_str())
                .with_desire(desired_department.as_str(), desired_location.as_str())
                .with_skill(f64::from(rng.random_range(1..=10u32)))
                .with_evaluation(f64::from(rng.random_range(1..=5u32)))
                .with_tenure(f64::from(rng.random_range(1..=20u32)))
                .with_age(rng.random_range(23..=60))
        })
        .collect();
    Ok(employees)
}
