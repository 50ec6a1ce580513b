//! Location compatibility models.
//!
//! A compatibility model maps an ordered pair of locations to a non-negative
//! relocation penalty. Unknown locations are always an error; a model never
//! falls back to a zero distance.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;

use staffplan_core::{Employee, Position, Result, StaffplanError};

/// Distance per step in the reference location ordering.
pub const REFERENCE_DISTANCE_SCALE: f64 = 200.0;

/// Trait for relocation distance lookups.
///
/// Implementations must not assume symmetry: `distance(a, b)` and
/// `distance(b, a)` are separate lookups.
pub trait CompatibilityModel: Send + Sync + Debug {
    /// Returns the non-negative penalty for moving from `from` to `to`.
    fn distance(&self, from: &str, to: &str) -> Result<f64>;
}

/// Returns true when the candidate position is exactly what the employee asked for.
///
/// Department-only positions match on the department alone.
///
/// # Examples
///
/// ```
/// use staffplan_core::{Employee, Position};
/// use staffplan_scoring::desire_match;
///
/// let e = Employee::new("A", "Y", "L2").with_desire("X", "L1");
/// assert!(desire_match(&e, &Position::new("X", "L1")));
/// assert!(!desire_match(&e, &Position::new("X", "L2")));
/// assert!(desire_match(&e, &Position::department_only("X")));
/// ```
pub fn desire_match(employee: &Employee, position: &Position) -> bool {
    employee.desired_department == position.department
        && position
            .location
            .as_deref()
            .map_or(true, |location| employee.desired_location == location)
}

/// Distance proportional to the gap between two locations in a fixed order.
///
/// `distance(a, b) = |index(a) - index(b)| * scale`
///
/// # Examples
///
/// ```
/// use staffplan_scoring::{CompatibilityModel, LinearLocationModel};
///
/// let model = LinearLocationModel::reference(["Tokyo", "Osaka", "Nagoya", "Fukuoka"]);
/// assert_eq!(model.distance("Tokyo", "Tokyo").unwrap(), 0.0);
/// assert_eq!(model.distance("Tokyo", "Nagoya").unwrap(), 400.0);
/// assert!(model.distance("Tokyo", "Sapporo").is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LinearLocationModel {
    locations: Vec<String>,
    scale: f64,
}

impl LinearLocationModel {
    /// Creates a model over the given ordering.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a negative or non-finite scale, or a
    /// location listed twice.
    pub fn new<I, S>(locations: I, scale: f64) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !scale.is_finite() || scale < 0.0 {
            return Err(StaffplanError::InvalidInput(format!(
                "distance scale must be finite and non-negative, got {}",
                scale
            )));
        }
        let locations: Vec<String> = locations.into_iter().map(Into::into).collect();
        let mut seen = HashSet::with_capacity(locations.len());
        for location in &locations {
            if !seen.insert(location.as_str()) {
                return Err(StaffplanError::InvalidInput(format!(
                    "location '{}' listed twice",
                    location
                )));
            }
        }
        Ok(Self { locations, scale })
    }

    /// Creates a model with the reference scale of 200 per step.
    ///
    /// Duplicate names keep their first index.
    pub fn reference<I, S>(locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ordered: Vec<String> = Vec::new();
        for location in locations {
            let location = location.into();
            if !ordered.contains(&location) {
                ordered.push(location);
            }
        }
        Self {
            locations: ordered,
            scale: REFERENCE_DISTANCE_SCALE,
        }
    }

    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Position of a location in the ordering.
    pub fn index_of(&self, location: &str) -> Result<usize> {
        self.locations
            .iter()
            .position(|l| l == location)
            .ok_or_else(|| StaffplanError::InvalidLocation(location.to_string()))
    }

    /// Materializes every ordered pair into an explicit matrix.
    pub fn to_matrix(&self) -> DistanceMatrix {
        let mut matrix = DistanceMatrix::new();
        for (i, a) in self.locations.iter().enumerate() {
            for (j, b) in self.locations.iter().enumerate() {
                matrix.entries.insert((a.clone(), b.clone()), i.abs_diff(j) as f64 * self.scale);
            }
            matrix.known.insert(a.clone());
        }
        matrix
    }
}

impl CompatibilityModel for LinearLocationModel {
    fn distance(&self, from: &str, to: &str) -> Result<f64> {
        let i = self.index_of(from)?;
        let j = self.index_of(to)?;
        Ok(i.abs_diff(j) as f64 * self.scale)
    }
}

/// Explicit distance lookup table.
///
/// Entries are directional. A pair of known locations with no entry is an
/// error as well, reported against the missing pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistanceMatrix {
    entries: HashMap<(String, String), f64>,
    known: HashSet<String>,
}

impl DistanceMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the distance from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a negative or non-finite distance.
    pub fn insert(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        distance: f64,
    ) -> Result<()> {
        let from = from.into();
        let to = to.into();
        if !distance.is_finite() || distance < 0.0 {
            return Err(StaffplanError::InvalidInput(format!(
                "distance {} -> {} must be finite and non-negative, got {}",
                from, to, distance
            )));
        }
        self.known.insert(from.clone());
        self.known.insert(to.clone());
        self.entries.insert((from, to), distance);
        Ok(())
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, from: impl Into<String>, to: impl Into<String>, distance: f64) -> Result<Self> {
        self.insert(from, to, distance)?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_location(&self, location: &str) -> bool {
        self.known.contains(location)
    }
}

impl CompatibilityModel for DistanceMatrix {
    fn distance(&self, from: &str, to: &str) -> Result<f64> {
        for location in [from, to] {
            if !self.known.contains(location) {
                return Err(StaffplanError::InvalidLocation(location.to_string()));
            }
        }
        self.entries
            .get(&(from.to_string(), to.to_string()))
            .copied()
            .ok_or_else(|| StaffplanError::InvalidLocation(format!("{} -> {}", from, to)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOCATIONS: [&str; 4] = ["Tokyo", "Osaka", "Nagoya", "Fukuoka"];

    #[test]
    fn test_linear_zero_on_same_location() {
        let model = LinearLocationModel::reference(LOCATIONS);
        for l in LOCATIONS {
            assert_eq!(model.distance(l, l).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_linear_monotone_in_index_gap() {
        let model = LinearLocationModel::reference(LOCATIONS);
        let mut last = 0.0;
        for to in &LOCATIONS[1..] {
            let d = model.distance("Tokyo", to).unwrap();
            assert!(d > 0.0);
            assert!(d >= last);
            last = d;
        }
        assert_eq!(last, 600.0);
    }

    #[test]
    fn test_linear_unknown_location() {
        let model = LinearLocationModel::reference(LOCATIONS);
        assert_eq!(
            model.distance("Sapporo", "Tokyo"),
            Err(StaffplanError::InvalidLocation("Sapporo".into()))
        );
        assert_eq!(
            model.distance("Tokyo", "Sapporo"),
            Err(StaffplanError::InvalidLocation("Sapporo".into()))
        );
    }

    #[test]
    fn test_linear_rejects_bad_scale_and_duplicates() {
        assert!(LinearLocationModel::new(LOCATIONS, f64::NAN).is_err());
        assert!(LinearLocationModel::new(LOCATIONS, -1.0).is_err());
        assert!(LinearLocationModel::new(["A", "B", "A"], 1.0).is_err());
        assert_eq!(LinearLocationModel::reference(["A", "B", "A"]).locations().len(), 2);
    }

    #[test]
    fn test_matrix_is_directional() {
        let matrix = DistanceMatrix::new()
            .with("A", "B", 10.0)
            .unwrap()
            .with("B", "A", 30.0)
            .unwrap();
        assert_eq!(matrix.distance("A", "B").unwrap(), 10.0);
        assert_eq!(matrix.distance("B", "A").unwrap(), 30.0);
        // known locations, missing pair
        assert!(matches!(
            matrix.distance("A", "A"),
            Err(StaffplanError::InvalidLocation(_))
        ));
        assert_eq!(
            matrix.distance("A", "C"),
            Err(StaffplanError::InvalidLocation("C".into()))
        );
    }

    #[test]
    fn test_matrix_rejects_negative_distance() {
        let mut matrix = DistanceMatrix::new();
        assert!(matrix.insert("A", "B", -1.0).is_err());
        assert!(matrix.is_empty());
    }

    #[test]
    fn test_linear_to_matrix_agrees() {
        let model = LinearLocationModel::reference(LOCATIONS);
        let matrix = model.to_matrix();
        assert_eq!(matrix.len(), 16);
        for a in LOCATIONS {
            for b in LOCATIONS {
                assert_eq!(model.distance(a, b).unwrap(), matrix.distance(a, b).unwrap());
            }
        }
    }
}
