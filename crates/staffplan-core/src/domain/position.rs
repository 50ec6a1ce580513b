//! Candidate positions and their capacities.

use std::fmt;

/// Index of a position in generation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct PositionId(pub usize);

impl PositionId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A seat an employee can be assigned to.
///
/// A position without a location is the department-only variant: distance
/// does not apply and desire matching compares the department alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub department: String,
    pub location: Option<String>,
    pub capacity: u32,
}

impl Position {
    /// Creates a (department, location) position with capacity 1.
    pub fn new(department: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            department: department.into(),
            location: Some(location.into()),
            capacity: 1,
        }
    }

    /// Creates a department-only position with capacity 1.
    pub fn department_only(department: impl Into<String>) -> Self {
        Self {
            department: department.into(),
            location: None,
            capacity: 1,
        }
    }

    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Returns `"department/location"`, or the department for department-only positions.
    pub fn label(&self) -> String {
        match &self.location {
            Some(location) => format!("{}/{}", self.department, location),
            None => self.department.clone(),
        }
    }

    /// Builds the department x location cross product, department-major.
    ///
    /// # Examples
    ///
    /// ```
    /// use staffplan_core::Position;
    ///
    /// let positions = Position::cross_product(&["X", "Y"], &["L1", "L2"]);
    /// assert_eq!(positions.len(), 4);
    /// assert_eq!(positions[1].label(), "X/L2");
    /// ```
    pub fn cross_product<D, L>(departments: &[D], locations: &[L]) -> Vec<Position>
    where
        D: AsRef<str>,
        L: AsRef<str>,
    {
        departments
            .iter()
            .flat_map(|d| {
                locations
                    .iter()
                    .map(move |l| Position::new(d.as_ref(), l.as_ref()))
            })
            .collect()
    }

    /// Builds one department-only position per department.
    pub fn departments<D: AsRef<str>>(departments: &[D]) -> Vec<Position> {
        departments
            .iter()
            .map(|d| Position::department_only(d.as_ref()))
            .collect()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Sum of all position capacities.
pub fn total_capacity(positions: &[Position]) -> u64 {
    positions.iter().map(|p| u64::from(p.capacity)).sum()
}
