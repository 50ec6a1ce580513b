//! Department skill-match matrix.
//!
//! The simpler planning variant: each employee has an explicit skill-match
//! score per department, and each department carries a weight. The score of
//! placing employee `e` in department `d` is `match[e][d] * weight[d]`.
//! Positions are department-only with capacity 1 unless overridden.

use std::collections::{HashMap, HashSet};

use staffplan_core::{EmployeeId, Position, PositionId, Result, ScoreRecord, StaffplanError};

use crate::table::ScoreTable;

/// Weight used for departments without an explicit weight.
pub const DEFAULT_DEPARTMENT_WEIGHT: f64 = 5.0;

/// Department columns of the reference team.
pub const REFERENCE_DEPARTMENTS: [&str; 4] = ["Sales", "Engineering", "HR", "Accounting"];

/// The reference team: five employees, scores in [`REFERENCE_DEPARTMENTS`] order.
///
/// With one seat per department the team does not fit.
pub const REFERENCE_TEAM: [(&str, [f64; 4]); 5] = [
    ("Sato", [2.0, 1.0, 5.0, 4.0]),
    ("Suzuki", [4.0, 3.0, 2.0, 9.0]),
    ("Takahashi", [2.0, 10.0, 7.0, 1.0]),
    ("Tanaka", [1.0, 2.0, 4.0, 4.0]),
    ("Ito", [9.0, 10.0, 1.0, 9.0]),
];

/// Per-department multipliers.
#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentWeights {
    weights: HashMap<String, f64>,
    default: f64,
}

impl Default for DepartmentWeights {
    fn default() -> Self {
        Self {
            weights: HashMap::new(),
            default: DEFAULT_DEPARTMENT_WEIGHT,
        }
    }
}

impl DepartmentWeights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the weight of one department.
    pub fn set(&mut self, department: impl Into<String>, weight: f64) -> Result<()> {
        if !weight.is_finite() {
            return Err(StaffplanError::InvalidWeight {
                name: "department",
                value: weight,
            });
        }
        self.weights.insert(department.into(), weight);
        Ok(())
    }

    pub fn with(mut self, department: impl Into<String>, weight: f64) -> Result<Self> {
        self.set(department, weight)?;
        Ok(self)
    }

    pub fn get(&self, department: &str) -> f64 {
        self.weights.get(department).copied().unwrap_or(self.default)
    }

    /// Departments with an explicit weight.
    pub fn departments(&self) -> impl Iterator<Item = &str> {
        self.weights.keys().map(String::as_str)
    }
}

/// Employee x department skill-match scores.
///
/// # Examples
///
/// ```
/// use staffplan_scoring::{DepartmentWeights, SkillMatchMatrix};
///
/// let matrix = SkillMatchMatrix::new(["Sales", "HR"])
///     .with_row("A", vec![2.0, 5.0]).unwrap()
///     .with_row("B", vec![4.0, 3.0]).unwrap();
/// let weights = DepartmentWeights::new().with("HR", 1.0).unwrap();
///
/// let table = matrix.score_table(&weights).unwrap();
/// assert_eq!(table.len(), 4);
/// // Sales keeps the default weight of 5
/// assert_eq!(table.records()[0].score, 10.0);
/// assert_eq!(table.records()[1].score, 5.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SkillMatchMatrix {
    departments: Vec<String>,
    rows: Vec<(EmployeeId, Vec<f64>)>,
}

impl SkillMatchMatrix {
    pub fn new<I, S>(departments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            departments: departments.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// The five-person reference team over four departments.
    pub fn reference_team() -> Result<Self> {
        let mut matrix = Self::new(REFERENCE_DEPARTMENTS);
        for (name, scores) in REFERENCE_TEAM {
            matrix.push_row(name, scores.to_vec())?;
        }
        Ok(matrix)
    }

    /// Appends one employee's scores, one per department in column order.
    pub fn push_row(&mut self, employee: impl Into<EmployeeId>, scores: Vec<f64>) -> Result<()> {
        let employee = employee.into();
        if scores.len() != self.departments.len() {
            return Err(StaffplanError::InvalidInput(format!(
                "employee {} has {} skill-match scores for {} departments",
                employee,
                scores.len(),
                self.departments.len()
            )));
        }
        if let Some(bad) = scores.iter().find(|s| !s.is_finite()) {
            return Err(StaffplanError::InvalidInput(format!(
                "employee {} has non-finite skill-match score {}",
                employee, bad
            )));
        }
        if self.rows.iter().any(|(id, _)| *id == employee) {
            return Err(StaffplanError::InvalidInput(format!(
                "duplicate employee id {}",
                employee
            )));
        }
        self.rows.push((employee, scores));
        Ok(())
    }

    pub fn with_row(mut self, employee: impl Into<EmployeeId>, scores: Vec<f64>) -> Result<Self> {
        self.push_row(employee, scores)?;
        Ok(self)
    }

    pub fn departments(&self) -> &[String] {
        &self.departments
    }

    pub fn employees(&self) -> impl Iterator<Item = &EmployeeId> {
        self.rows.iter().map(|(id, _)| id)
    }

    pub fn employee_count(&self) -> usize {
        self.rows.len()
    }

    /// Raw match score of one employee in one department.
    pub fn get(&self, employee: &EmployeeId, department: &str) -> Option<f64> {
        let column = self.departments.iter().position(|d| d == department)?;
        self.rows
            .iter()
            .find(|(id, _)| id == employee)
            .map(|(_, scores)| scores[column])
    }

    /// One department-only position per column, each with capacity 1.
    pub fn positions(&self) -> Vec<Position> {
        Position::departments(&self.departments)
    }

    /// Weighted records, employee-major, with positions indexed as in
    /// [`positions`](Self::positions).
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a department listed twice, or a weight naming a
    /// department the matrix does not have.
    pub fn score_table(&self, weights: &DepartmentWeights) -> Result<ScoreTable> {
        let mut unique = HashSet::with_capacity(self.departments.len());
        if let Some(d) = self.departments.iter().find(|d| !unique.insert(d.as_str())) {
            return Err(StaffplanError::InvalidInput(format!(
                "department '{}' listed twice",
                d
            )));
        }
        let unknown = weights.departments().filter(|d| !unique.contains(d)).min();
        if let Some(d) = unknown {
            return Err(StaffplanError::InvalidInput(format!(
                "weight given for unknown department '{}'",
                d
            )));
        }

        let column_weights: Vec<f64> = self.departments.iter().map(|d| weights.get(d)).collect();
        let records = self
            .rows
            .iter()
            .flat_map(|(employee, scores)| {
                scores
                    .iter()
                    .zip(&column_weights)
                    .enumerate()
                    .map(move |(column, (score, weight))| {
                        ScoreRecord::new(employee.clone(), PositionId(column), score * weight)
                    })
            })
            .collect();
        ScoreTable::from_records(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_validation() {
        let mut m = SkillMatchMatrix::new(["A", "B"]);
        assert!(m.push_row("x", vec![1.0]).is_err());
        assert!(m.push_row("x", vec![1.0, f64::NAN]).is_err());
        assert!(m.push_row("x", vec![1.0, 2.0]).is_ok());
        assert!(m.push_row("x", vec![3.0, 4.0]).is_err());
        assert_eq!(m.employee_count(), 1);
    }

    #[test]
    fn test_lookup() {
        let m = SkillMatchMatrix::new(["A", "B"])
            .with_row("x", vec![1.0, 2.0])
            .unwrap();
        assert_eq!(m.get(&"x".into(), "B"), Some(2.0));
        assert_eq!(m.get(&"x".into(), "C"), None);
        assert_eq!(m.get(&"y".into(), "A"), None);
    }

    #[test]
    fn test_department_weights() {
        let w = DepartmentWeights::new().with("A", 2.0).unwrap();
        assert_eq!(w.get("A"), 2.0);
        assert_eq!(w.get("B"), DEFAULT_DEPARTMENT_WEIGHT);
        assert!(DepartmentWeights::new().with("A", f64::INFINITY).is_err());
    }

    #[test]
    fn test_positions_are_department_only() {
        let m = SkillMatchMatrix::new(["A", "B", "C"]);
        let positions = m.positions();
        assert_eq!(positions.len(), 3);
        assert!(positions.iter().all(|p| p.location.is_none() && p.capacity == 1));
    }

    #[test]
    fn test_weight_for_unknown_department_rejected() {
        let m = SkillMatchMatrix::new(["Sales", "HR"])
            .with_row("x", vec![1.0, 2.0])
            .unwrap();
        let typo = DepartmentWeights::new().with("Salse", 7.0).unwrap();
        assert_eq!(
            m.score_table(&typo),
            Err(StaffplanError::InvalidInput(
                "weight given for unknown department 'Salse'".into()
            ))
        );
        let known = DepartmentWeights::new().with("Sales", 7.0).unwrap();
        assert_eq!(m.score_table(&known).unwrap().records()[0].score, 7.0);
    }

    #[test]
    fn test_duplicate_department_rejected() {
        let m = SkillMatchMatrix::new(["A", "A"])
            .with_row("x", vec![1.0, 2.0])
            .unwrap();
        assert!(m.score_table(&DepartmentWeights::new()).is_err());
    }

    #[test]
    fn test_reference_team_scores() {
        let m = SkillMatchMatrix::reference_team().unwrap();
        assert_eq!(m.employee_count(), 5);
        assert_eq!(m.get(&"Suzuki".into(), "Accounting"), Some(9.0));

        let weights = DepartmentWeights::new().with("HR", 10.0).unwrap();
        let table = m.score_table(&weights).unwrap();

        assert_eq!(table.len(), 20);
        let ito = EmployeeId::from("Ito");
        assert_eq!(table.get(&ito, PositionId(1)).map(|r| r.score), Some(50.0));
        let sato = EmployeeId::from("Sato");
        assert_eq!(table.get(&sato, PositionId(2)).map(|r| r.score), Some(50.0));
    }
}
