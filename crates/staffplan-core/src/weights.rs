//! Objective weights and the named scoring presets.

use crate::error::{Result, StaffplanError};

/// Weights applied to each term of the reassignment score.
///
/// Values are unconstrained reals. Sliders commonly stay within `[0, 1]`,
/// but negative or large weights are valid input.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "snake_case")
)]
pub struct WeightVector {
    pub skill: f64,
    pub evaluation: f64,
    pub desire: f64,
    pub distance: f64,
    pub tenure: f64,
}

/// Proposal A: skill and evaluation only.
pub const SKILL_AND_EVALUATION: WeightVector = WeightVector {
    skill: 0.6,
    evaluation: 0.4,
    desire: 0.0,
    distance: 0.0,
    tenure: 0.0,
};

/// Proposal B: desire match and relocation distance only.
pub const DESIRE_AND_DISTANCE: WeightVector = WeightVector {
    skill: 0.0,
    evaluation: 0.0,
    desire: 1.0,
    distance: 1.0,
    tenure: 0.0,
};

impl WeightVector {
    /// All-zero weights.
    pub const ZERO: WeightVector = WeightVector {
        skill: 0.0,
        evaluation: 0.0,
        desire: 0.0,
        distance: 0.0,
        tenure: 0.0,
    };

    /// Creates a weight vector with the same weight on every term.
    pub const fn uniform(weight: f64) -> Self {
        Self {
            skill: weight,
            evaluation: weight,
            desire: weight,
            distance: weight,
            tenure: weight,
        }
    }

    /// Returns `(name, value)` for each term, in formula order.
    pub fn terms(&self) -> [(&'static str, f64); 5] {
        [
            ("skill", self.skill),
            ("evaluation", self.evaluation),
            ("desire", self.desire),
            ("distance", self.distance),
            ("tenure", self.tenure),
        ]
    }

    /// Rejects NaN and infinite weights.
    ///
    /// # Examples
    ///
    /// ```
    /// use staffplan_core::{StaffplanError, WeightVector};
    ///
    /// assert!(WeightVector::uniform(-3.5).validate().is_ok());
    ///
    /// let bad = WeightVector { desire: f64::NAN, ..WeightVector::default() };
    /// assert!(matches!(bad.validate(), Err(StaffplanError::InvalidWeight { name: "desire", .. })));
    /// ```
    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.terms() {
            if !value.is_finite() {
                return Err(StaffplanError::InvalidWeight { name, value });
            }
        }
        Ok(())
    }
}

impl Default for WeightVector {
    /// Slider defaults: 0.25 on every term.
    fn default() -> Self {
        Self::uniform(0.25)
    }
}

/// Named scoring mode, resolved to a weight vector over the same formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoringMode {
    SkillAndEvaluation,
    DesireAndDistance,
    Custom(WeightVector),
}

impl ScoringMode {
    pub fn weights(&self) -> WeightVector {
        match self {
            ScoringMode::SkillAndEvaluation => SKILL_AND_EVALUATION,
            ScoringMode::DesireAndDistance => DESIRE_AND_DISTANCE,
            ScoringMode::Custom(weights) => *weights,
        }
    }

    /// Short display name.
    pub fn name(&self) -> &'static str {
        match self {
            ScoringMode::SkillAndEvaluation => "skill-and-evaluation",
            ScoringMode::DesireAndDistance => "desire-and-distance",
            ScoringMode::Custom(_) => "custom",
        }
    }
}

impl Default for ScoringMode {
    fn default() -> Self {
        ScoringMode::Custom(WeightVector::default())
    }
}

impl std::fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
