//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use staffplan::{BackendKind, ScoringMode, WeightVector};

#[derive(Debug, Parser)]
#[command(name = "staffplan")]
#[command(about = "Weighted employee reassignment proposals", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (TOML, or YAML by extension)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Roster file (JSON array of employees); a synthetic roster is used otherwise
    #[arg(short, long, global = true)]
    pub roster: Option<PathBuf>,

    /// Seed for the synthetic roster
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Size of the synthetic roster
    #[arg(short = 'n', long, global = true)]
    pub employees: Option<usize>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = Format::Table)]
    pub format: Format,

    /// Suppress solver progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(flatten)]
    pub weights: WeightArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Greedy proposals: each employee takes their best position
    Propose {
        /// Proposal to show; all three when omitted
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,
    },

    /// Capacity-respecting optimal plan
    Optimize {
        #[arg(short, long, value_enum, default_value_t = ModeArg::C)]
        mode: ModeArg,

        #[command(flatten)]
        solver: SolverArgs,
    },

    /// Proposals A, B, C and the optimal plan, with before/after head counts
    Compare {
        #[command(flatten)]
        solver: SolverArgs,
    },

    /// Department skill-match planning on the built-in five-person team
    SkillMatch {
        /// Department weight as DEPARTMENT=WEIGHT (default weight 5)
        #[arg(short, long = "weight", value_parser = parse_department_weight)]
        weights: Vec<(String, f64)>,

        /// Seats per department
        #[arg(long, default_value_t = 1)]
        capacity: u32,

        #[command(flatten)]
        solver: SolverArgs,
    },
}

/// Overrides for the custom proposal weights.
#[derive(Debug, Clone, Default, Args)]
pub struct WeightArgs {
    #[arg(long = "w-skill", global = true, allow_negative_numbers = true)]
    pub skill: Option<f64>,

    #[arg(long = "w-evaluation", global = true, allow_negative_numbers = true)]
    pub evaluation: Option<f64>,

    #[arg(long = "w-desire", global = true, allow_negative_numbers = true)]
    pub desire: Option<f64>,

    #[arg(long = "w-distance", global = true, allow_negative_numbers = true)]
    pub distance: Option<f64>,

    #[arg(long = "w-tenure", global = true, allow_negative_numbers = true)]
    pub tenure: Option<f64>,
}

impl WeightArgs {
    /// Applies the given overrides on top of `base`.
    pub fn apply(&self, base: WeightVector) -> WeightVector {
        WeightVector {
            skill: self.skill.unwrap_or(base.skill),
            evaluation: self.evaluation.unwrap_or(base.evaluation),
            desire: self.desire.unwrap_or(base.desire),
            distance: self.distance.unwrap_or(base.distance),
            tenure: self.tenure.unwrap_or(base.tenure),
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct SolverArgs {
    /// Optimal-mode backend
    #[arg(short, long, value_enum)]
    pub backend: Option<BackendArg>,

    /// Give up after this many milliseconds
    #[arg(long)]
    pub time_limit_ms: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Table,
    Json,
}

/// Proposal selector: A skill and evaluation, B desire and distance, C custom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    A,
    B,
    C,
}

impl ModeArg {
    pub fn resolve(self, custom: WeightVector) -> ScoringMode {
        match self {
            ModeArg::A => ScoringMode::SkillAndEvaluation,
            ModeArg::B => ScoringMode::DesireAndDistance,
            ModeArg::C => ScoringMode::Custom(custom),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    Hungarian,
    MinCostFlow,
    LinearProgram,
}

impl From<BackendArg> for BackendKind {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Hungarian => BackendKind::Hungarian,
            BackendArg::MinCostFlow => BackendKind::MinCostFlow,
            BackendArg::LinearProgram => BackendKind::LinearProgram,
        }
    }
}

fn parse_department_weight(s: &str) -> Result<(String, f64), String> {
    let (department, weight) = s
        .split_once('=')
        .ok_or_else(|| format!("expected DEPARTMENT=WEIGHT, got '{}'", s))?;
    let weight: f64 = weight
        .trim()
        .parse()
        .map_err(|e| format!("bad weight '{}': {}", weight, e))?;
    Ok((department.trim().to_string(), weight))
}
