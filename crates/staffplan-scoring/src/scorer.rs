//! Weighted reassignment scorer.
//!
//! ```text
//! score = skill * w.skill
//!       + evaluation * w.evaluation
//!       + desire_match * DESIRE_SCALE * w.desire
//!       - distance(current, candidate) / PENALTY_SCALE * w.distance
//!       + tenure * w.tenure
//! ```
//!
//! Scoring is split in two: [`pair_signals`] does the model lookups for one
//! (employee, position) pair, [`weigh`] applies a weight vector to them. The
//! split lets one lookup pass feed several weight vectors.

use staffplan_core::{Employee, Position, PositionId, Result, ScoreComponents, ScoreRecord, WeightVector};

use crate::compatibility::{desire_match, CompatibilityModel};

/// Multiplier on the desire-match indicator.
pub const DESIRE_SCALE: f64 = 10.0;

/// Divisor on the raw relocation distance.
pub const PENALTY_SCALE: f64 = 100.0;

/// Weight-independent signals for one (employee, position) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairSignals {
    pub desire_match: bool,
    /// Raw model distance; 0 for department-only positions.
    pub distance: f64,
}

/// Looks up the compatibility signals for one pair.
pub fn pair_signals<C>(employee: &Employee, position: &Position, model: &C) -> Result<PairSignals>
where
    C: CompatibilityModel + ?Sized,
{
    let distance = match &position.location {
        Some(location) => model.distance(&employee.current_location, location)?,
        None => 0.0,
    };
    Ok(PairSignals {
        desire_match: desire_match(employee, position),
        distance,
    })
}

/// Applies a weight vector to an employee's attributes and pair signals.
pub fn weigh(employee: &Employee, signals: PairSignals, weights: &WeightVector) -> ScoreComponents {
    let desire = if signals.desire_match { DESIRE_SCALE * weights.desire } else { 0.0 };
    ScoreComponents {
        skill: employee.skill * weights.skill,
        evaluation: employee.evaluation * weights.evaluation,
        desire,
        distance: -(signals.distance / PENALTY_SCALE) * weights.distance,
        tenure: employee.tenure_years * weights.tenure,
    }
}

/// Scores one pair under one weight vector.
///
/// # Errors
///
/// `InvalidWeight` for a non-finite weight, `InvalidInput` for a non-finite
/// employee attribute, `InvalidLocation` from the model.
///
/// # Examples
///
/// ```
/// use staffplan_core::{Employee, Position, WeightVector};
/// use staffplan_scoring::{score, DistanceMatrix};
///
/// let model = DistanceMatrix::new()
///     .with("L1", "L1", 0.0).unwrap()
///     .with("L1", "L2", 200.0).unwrap();
/// let a = Employee::new("A", "Y", "L1")
///     .with_desire("X", "L1")
///     .with_skill(8.0)
///     .with_evaluation(5.0)
///     .with_tenure(3.0);
/// let w = WeightVector::uniform(1.0);
///
/// assert_eq!(score(&a, &Position::new("X", "L1"), &w, &model).unwrap().total(), 26.0);
/// assert_eq!(score(&a, &Position::new("Y", "L2"), &w, &model).unwrap().total(), 14.0);
/// ```
pub fn score<C>(
    employee: &Employee,
    position: &Position,
    weights: &WeightVector,
    model: &C,
) -> Result<ScoreComponents>
where
    C: CompatibilityModel + ?Sized,
{
    weights.validate()?;
    employee.validate()?;
    let signals = pair_signals(employee, position, model)?;
    Ok(weigh(employee, signals, weights))
}

/// A validated weight vector bound to a compatibility model.
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'m, C: ?Sized> {
    weights: WeightVector,
    model: &'m C,
}

impl<'m, C> Scorer<'m, C>
where
    C: CompatibilityModel + ?Sized,
{
    /// Creates a scorer, rejecting non-finite weights.
    pub fn new(weights: WeightVector, model: &'m C) -> Result<Self> {
        weights.validate()?;
        Ok(Self { weights, model })
    }

    pub fn weights(&self) -> &WeightVector {
        &self.weights
    }

    pub fn score(&self, employee: &Employee, position: &Position) -> Result<ScoreComponents> {
        employee.validate()?;
        let signals = pair_signals(employee, position, self.model)?;
        Ok(weigh(employee, signals, &self.weights))
    }

    /// Scores a pair into a record for the position at `id`.
    pub fn record(&self, employee: &Employee, id: PositionId, position: &Position) -> Result<ScoreRecord> {
        let components = self.score(employee, position)?;
        Ok(ScoreRecord::from_components(employee.id.clone(), id, components))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compatibility::LinearLocationModel;
    use staffplan_core::StaffplanError;

    fn model() -> LinearLocationModel {
        LinearLocationModel::reference(["L1", "L2", "L3"])
    }

    fn employee() -> Employee {
        Employee::new("A", "Y", "L1")
            .with_desire("X", "L1")
            .with_skill(8.0)
            .with_evaluation(5.0)
            .with_tenure(3.0)
    }

    #[test]
    fn test_reference_example() {
        let w = WeightVector::uniform(1.0);
        let hit = score(&employee(), &Position::new("X", "L1"), &w, &model()).unwrap();
        let miss = score(&employee(), &Position::new("Y", "L2"), &w, &model()).unwrap();

        assert_eq!(hit.total(), 26.0);
        assert_eq!(hit.desire, 10.0);
        assert_eq!(hit.distance, 0.0);
        assert_eq!(miss.total(), 14.0);
        assert_eq!(miss.distance, -2.0);
    }

    #[test]
    fn test_deterministic() {
        let w = WeightVector {
            skill: 0.3,
            evaluation: 0.7,
            desire: 0.11,
            distance: 0.9,
            tenure: 0.05,
        };
        let p = Position::new("Z", "L3");
        let first = score(&employee(), &p, &w, &model()).unwrap();
        for _ in 0..10 {
            assert_eq!(score(&employee(), &p, &w, &model()).unwrap(), first);
        }
    }

    #[test]
    fn test_desire_bonus_exact() {
        let w = WeightVector {
            desire: 0.37,
            ..WeightVector::ZERO
        };
        let hit = score(&employee(), &Position::new("X", "L1"), &w, &model()).unwrap();
        assert_eq!(hit.total(), DESIRE_SCALE * 0.37);

        for p in [Position::new("X", "L2"), Position::new("Y", "L1")] {
            assert_eq!(score(&employee(), &p, &w, &model()).unwrap().total(), 0.0);
        }
    }

    #[test]
    fn test_negative_weights_allowed() {
        let w = WeightVector {
            skill: -1.0,
            distance: -1.0,
            ..WeightVector::ZERO
        };
        let c = score(&employee(), &Position::new("Y", "L3"), &w, &model()).unwrap();
        // negative distance weight turns the penalty into a bonus
        assert_eq!(c.distance, 4.0);
        assert_eq!(c.skill, -8.0);
    }

    #[test]
    fn test_department_only_has_no_distance() {
        let w = WeightVector::uniform(1.0);
        let c = score(&employee(), &Position::department_only("X"), &w, &model()).unwrap();
        assert_eq!(c.distance, 0.0);
        assert_eq!(c.desire, 10.0);
    }

    #[test]
    fn test_errors_propagate() {
        let w = WeightVector::uniform(1.0);
        let err = score(&employee(), &Position::new("X", "Nowhere"), &w, &model()).unwrap_err();
        assert_eq!(err, StaffplanError::InvalidLocation("Nowhere".into()));

        let nan = WeightVector {
            tenure: f64::NAN,
            ..w
        };
        assert!(matches!(
            score(&employee(), &Position::new("X", "L1"), &nan, &model()),
            Err(StaffplanError::InvalidWeight { name: "tenure", .. })
        ));
        assert!(Scorer::new(nan, &model()).is_err());
    }

    #[test]
    fn test_scorer_record() {
        let m = model();
        let scorer = Scorer::new(WeightVector::uniform(1.0), &m).unwrap();
        let r = scorer.record(&employee(), PositionId(4), &Position::new("X", "L1")).unwrap();
        assert_eq!(r.position, PositionId(4));
        assert_eq!(r.score, 26.0);
        assert_eq!(r.employee.as_str(), "A");
    }

    #[test]
    fn test_reference_fixture_with_matrix_model() {
        let example = staffplan_test::reference_example();
        let mut model = crate::compatibility::DistanceMatrix::new();
        for (from, to, d) in &example.distances {
            model.insert(*from, *to, *d).unwrap();
        }
        let scorer = Scorer::new(example.weights, &model).unwrap();
        let totals: Vec<f64> = example
            .positions
            .iter()
            .map(|p| scorer.score(&example.employees[0], p).unwrap().total())
            .collect();
        assert_eq!(totals, vec![26.0, 14.0]);
    }
}
