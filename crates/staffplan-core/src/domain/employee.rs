//! Employee roster entries.

use std::fmt;

use crate::error::{Result, StaffplanError};

/// Unique employee identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EmployeeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EmployeeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<EmployeeId> for EmployeeId {
    fn as_ref(&self) -> &EmployeeId {
        self
    }
}

/// An employee considered for reassignment.
///
/// Numeric attributes are unbounded reals in the type; the roster source
/// decides their ranges. They must be finite to be scored.
///
/// # Examples
///
/// ```
/// use staffplan_core::Employee;
///
/// let e = Employee::new("E01", "Sales", "Tokyo")
///     .with_desire("Engineering", "Osaka")
///     .with_skill(8.0)
///     .with_evaluation(5.0)
///     .with_tenure(3.0);
///
/// assert_eq!(e.desired_department, "Engineering");
/// assert!(e.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Employee {
    pub id: EmployeeId,
    pub current_department: String,
    pub current_location: String,
    pub desired_department: String,
    pub desired_location: String,
    pub skill: f64,
    pub evaluation: f64,
    pub tenure_years: f64,
    pub age: u32,
}

impl Employee {
    /// Creates an employee who wishes to stay where they are, with zeroed scores.
    pub fn new(
        id: impl Into<EmployeeId>,
        department: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        let department = department.into();
        let location = location.into();
        Self {
            id: id.into(),
            desired_department: department.clone(),
            desired_location: location.clone(),
            current_department: department,
            current_location: location,
            skill: 0.0,
            evaluation: 0.0,
            tenure_years: 0.0,
            age: 0,
        }
    }

    pub fn with_desire(mut self, department: impl Into<String>, location: impl Into<String>) -> Self {
        self.desired_department = department.into();
        self.desired_location = location.into();
        self
    }

    pub fn with_skill(mut self, skill: f64) -> Self {
        self.skill = skill;
        self
    }

    pub fn with_evaluation(mut self, evaluation: f64) -> Self {
        self.evaluation = evaluation;
        self
    }

    pub fn with_tenure(mut self, years: f64) -> Self {
        self.tenure_years = years;
        self
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = age;
        self
    }

    /// Checks that every scored attribute is finite.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("skill", self.skill),
            ("evaluation", self.evaluation),
            ("tenure_years", self.tenure_years),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(StaffplanError::InvalidInput(format!(
                    "employee {} has non-finite {}: {}",
                    self.id, name, value
                )));
            }
        }
        Ok(())
    }
}

impl AsRef<EmployeeId> for Employee {
    fn as_ref(&self) -> &EmployeeId {
        &self.id
    }
}
