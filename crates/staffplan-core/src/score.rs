//! Score records for (employee, position) candidates.
//!
//! A record carries the total used for selection and, when produced by the
//! weighted scorer, the signed contribution of each term.

use crate::domain::{EmployeeId, PositionId};

/// Signed, already-weighted contribution of each scoring term.
///
/// `distance` is stored as the (usually negative) amount added to the total.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreComponents {
    pub skill: f64,
    pub evaluation: f64,
    pub desire: f64,
    pub distance: f64,
    pub tenure: f64,
}

impl ScoreComponents {
    /// Sum of all contributions.
    #[inline]
    pub fn total(&self) -> f64 {
        self.skill + self.evaluation + self.desire + self.distance + self.tenure
    }

    /// Components rounded to two decimals.
    pub fn rounded(&self) -> Self {
        Self {
            skill: round_for_display(self.skill),
            evaluation: round_for_display(self.evaluation),
            desire: round_for_display(self.desire),
            distance: round_for_display(self.distance),
            tenure: round_for_display(self.tenure),
        }
    }
}

/// One scored candidate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreRecord {
    pub employee: EmployeeId,
    pub position: PositionId,
    pub score: f64,
    pub components: Option<ScoreComponents>,
}

impl ScoreRecord {
    /// Creates a record with an opaque score (no component breakdown).
    pub fn new(employee: impl Into<EmployeeId>, position: PositionId, score: f64) -> Self {
        Self {
            employee: employee.into(),
            position,
            score,
            components: None,
        }
    }

    /// Creates a record whose score is the sum of its components.
    pub fn from_components(
        employee: impl Into<EmployeeId>,
        position: PositionId,
        components: ScoreComponents,
    ) -> Self {
        Self {
            employee: employee.into(),
            position,
            score: components.total(),
            components: Some(components),
        }
    }
}

/// Rounds to two decimals. Display only; selection uses full precision.
#[inline]
pub fn round_for_display(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
