//! Planning runs driven by configuration.
//!
//! A [`Planner`] holds the candidate positions, the custom weights, the
//! compatibility model and the optimal assigner. It scores a roster once
//! for all three proposals and resolves each of them.

use staffplan_config::{BackendKind, ConfigError, StaffplanConfig};
use staffplan_core::{
    AssignmentPlan, Employee, Position, Result, ScoreRecord, ScoringMode, StaffplanError,
    WeightVector,
};
use staffplan_scoring::{
    compute_scores, compute_scores_multi, CompatibilityModel, LinearLocationModel, ScoreTable,
};
use staffplan_solver::{greedy_assign, OptimalAssigner, SolveStats};
use thiserror::Error;
use tracing::info;

/// Error from building or running a planner.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Plan(#[from] StaffplanError),
}

/// A greedy plan under one scoring mode.
#[derive(Debug, Clone, PartialEq)]
pub struct Proposal {
    pub mode: ScoringMode,
    pub plan: AssignmentPlan,
}

/// The constrained-optimal plan and how it was found.
#[derive(Debug, Clone)]
pub struct OptimalOutcome {
    pub mode: ScoringMode,
    pub backend: BackendKind,
    pub plan: AssignmentPlan,
    pub stats: SolveStats,
}

/// All proposals for one roster, plus the optimal plan under the custom weights.
///
/// The optimal plan is kept as a `Result`: an infeasible capacity setup
/// does not invalidate the greedy proposals.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub proposals: Vec<Proposal>,
    pub optimal: Result<OptimalOutcome>,
}

/// Scores a roster and resolves plans against fixed positions.
#[derive(Debug, Clone)]
pub struct Planner<C = LinearLocationModel> {
    weights: WeightVector,
    positions: Vec<Position>,
    model: C,
    assigner: OptimalAssigner,
}

impl Planner<LinearLocationModel> {
    /// Builds a planner from configuration: positions from the taxonomy and
    /// capacities, a linear location model, and the configured backend.
    ///
    /// # Examples
    ///
    /// ```
    /// use staffplan::{Planner, StaffplanConfig};
    ///
    /// let planner = Planner::from_config(&StaffplanConfig::default()).unwrap();
    /// assert_eq!(planner.positions().len(), 16);
    /// ```
    pub fn from_config(config: &StaffplanConfig) -> std::result::Result<Self, PlanError> {
        let positions = config.positions()?;
        let model = LinearLocationModel::new(
            config.taxonomy.locations.iter().cloned(),
            config.taxonomy.distance_scale,
        )?;
        Ok(Self::new(config.weights, positions, model)
            .with_assigner(OptimalAssigner::from_config(&config.solver)))
    }
}

impl<C> Planner<C>
where
    C: CompatibilityModel,
{
    pub fn new(weights: WeightVector, positions: Vec<Position>, model: C) -> Self {
        Self {
            weights,
            positions,
            model,
            assigner: OptimalAssigner::default(),
        }
    }

    pub fn with_assigner(mut self, assigner: OptimalAssigner) -> Self {
        self.assigner = assigner;
        self
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn weights(&self) -> &WeightVector {
        &self.weights
    }

    pub fn model(&self) -> &C {
        &self.model
    }

    /// Proposal modes A, B and C, in that order.
    pub fn modes(&self) -> [ScoringMode; 3] {
        [
            ScoringMode::SkillAndEvaluation,
            ScoringMode::DesireAndDistance,
            ScoringMode::Custom(self.weights),
        ]
    }

    /// Greedy proposals A, B and C from one scoring pass.
    pub fn propose(&self, employees: &[Employee]) -> Result<Vec<Proposal>> {
        let (_, proposals) = self.score_and_propose(employees)?;
        info!(
            employees = employees.len(),
            positions = self.positions.len(),
            proposals = proposals.len(),
            "Proposals computed"
        );
        Ok(proposals)
    }

    /// The capacity-respecting optimum under one scoring mode.
    pub fn optimize(&self, employees: &[Employee], mode: ScoringMode) -> Result<OptimalOutcome> {
        let table = compute_scores(employees, &self.positions, &mode.weights(), &self.model)?;
        self.solve(employees, mode, table.records())
    }

    /// Proposals A, B, C and the optimal plan under the custom weights.
    ///
    /// Scoring errors fail the whole comparison; solve errors only fail
    /// [`Comparison::optimal`].
    pub fn compare(&self, employees: &[Employee]) -> Result<Comparison> {
        let (tables, proposals) = self.score_and_propose(employees)?;

        let custom = proposals.len() - 1;
        let optimal = self.solve(employees, proposals[custom].mode, tables[custom].records());
        if let Err(e) = &optimal {
            info!(error = %e, "Optimal plan unavailable");
        }
        Ok(Comparison { proposals, optimal })
    }

    /// One scoring pass over every mode, and the greedy plan of each table.
    fn score_and_propose(&self, employees: &[Employee]) -> Result<(Vec<ScoreTable>, Vec<Proposal>)> {
        let modes = self.modes();
        let weights: Vec<WeightVector> = modes.iter().map(ScoringMode::weights).collect();
        let tables = compute_scores_multi(employees, &self.positions, &weights, &self.model)?;

        let proposals = modes
            .into_iter()
            .zip(&tables)
            .map(|(mode, table)| {
                Ok(Proposal {
                    mode,
                    plan: greedy_assign(table.records())?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok((tables, proposals))
    }

    fn solve(
        &self,
        employees: &[Employee],
        mode: ScoringMode,
        records: &[ScoreRecord],
    ) -> Result<OptimalOutcome> {
        let (plan, stats) = self
            .assigner
            .solve_with_stats(employees, &self.positions, records)?;
        Ok(OptimalOutcome {
            mode,
            backend: self.assigner.backend(),
            plan,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use staffplan_core::PositionId;
    use staffplan_test::small_roster;

    fn planner() -> Planner {
        Planner::from_config(&StaffplanConfig::default()).unwrap()
    }

    #[test]
    fn test_three_proposals_in_order() {
        let proposals = planner().propose(&small_roster()).unwrap();
        let names: Vec<_> = proposals.iter().map(|p| p.mode.name()).collect();
        assert_eq!(names, vec!["skill-and-evaluation", "desire-and-distance", "custom"]);
        assert!(proposals.iter().all(|p| p.plan.len() == 6));
    }

    #[test]
    fn test_skill_and_evaluation_ties_to_first_position() {
        // Proposal A does not depend on the position, so every employee
        // keeps the first candidate.
        let proposals = planner().propose(&small_roster()).unwrap();
        assert!(proposals[0]
            .plan
            .iter()
            .all(|a| a.position == PositionId(0)));
        let e03 = proposals[0].plan.get(&"E03".into()).unwrap();
        assert!((e03.score - (10.0 * 0.6 + 5.0 * 0.4)).abs() < 1e-9);
    }

    #[test]
    fn test_desire_and_distance_honours_desire() {
        let planner = planner();
        let proposals = planner.propose(&small_roster()).unwrap();
        let e02 = proposals[1].plan.get(&"E02".into()).unwrap();
        let position = &planner.positions()[e02.position.index()];
        assert_eq!(position.label(), "HR/Osaka");
        assert_eq!(e02.score, 10.0);
    }

    #[test]
    fn test_compare_includes_feasible_optimum() {
        let comparison = planner().compare(&small_roster()).unwrap();
        let optimal = comparison.optimal.as_ref().unwrap();
        let positions = planner().positions().to_vec();

        assert_eq!(optimal.backend, BackendKind::Hungarian);
        assert!(optimal.plan.respects_capacity(&positions));
        // greedy is the unconstrained maximum
        assert!(optimal.plan.total_score() <= comparison.proposals[2].plan.total_score() + 1e-9);
    }

    #[test]
    fn test_compare_proposals_match_propose() {
        let planner = planner();
        let roster = small_roster();
        let comparison = planner.compare(&roster).unwrap();
        assert_eq!(comparison.proposals, planner.propose(&roster).unwrap());
        assert_eq!(comparison.optimal.unwrap().mode, planner.modes()[2]);
    }

    #[test]
    fn test_infeasible_optimum_keeps_proposals() {
        let config = StaffplanConfig::default()
            .with_department_only(true)
            .with_default_capacity(1);
        let comparison = Planner::from_config(&config)
            .unwrap()
            .compare(&small_roster())
            .unwrap();
        assert_eq!(comparison.proposals.len(), 3);
        assert!(matches!(comparison.optimal, Err(StaffplanError::Infeasible(_))));
    }

    #[test]
    fn test_optimize_with_min_cost_flow_matches_hungarian() {
        let hungarian = planner()
            .optimize(&small_roster(), ScoringMode::DesireAndDistance)
            .unwrap();
        let config = StaffplanConfig::default().with_backend(BackendKind::MinCostFlow);
        let flow = Planner::from_config(&config)
            .unwrap()
            .optimize(&small_roster(), ScoringMode::DesireAndDistance)
            .unwrap();
        assert_eq!(flow.backend, BackendKind::MinCostFlow);
        assert!((flow.plan.total_score() - hungarian.plan.total_score()).abs() < 1e-6);
    }

    #[test]
    fn test_unknown_location_in_roster() {
        let mut roster = small_roster();
        roster[0].current_location = "Sapporo".into();
        let err = planner().propose(&roster).unwrap_err();
        assert_eq!(err, StaffplanError::InvalidLocation("Sapporo".into()));
    }
}
