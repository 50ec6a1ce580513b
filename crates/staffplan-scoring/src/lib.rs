//! Weighted reassignment scoring for staffplan.
//!
//! This crate turns a roster and a list of candidate positions into score
//! records:
//! - Compatibility models (`LinearLocationModel`, `DistanceMatrix`)
//! - The weighted scorer and its normalization constants
//! - Score tables for one or several weight vectors
//! - The department skill-match matrix variant
//!
//! Everything here is a pure function of its inputs.

pub mod compatibility;
pub mod scorer;
pub mod skill_match;
pub mod table;

pub use compatibility::{
    desire_match, CompatibilityModel, DistanceMatrix, LinearLocationModel,
    REFERENCE_DISTANCE_SCALE,
};
pub use scorer::{pair_signals, score, weigh, PairSignals, Scorer, DESIRE_SCALE, PENALTY_SCALE};
pub use skill_match::{
    DepartmentWeights, SkillMatchMatrix, DEFAULT_DEPARTMENT_WEIGHT, REFERENCE_DEPARTMENTS,
    REFERENCE_TEAM,
};
pub use table::{compute_scores, compute_scores_multi, ScoreTable};
