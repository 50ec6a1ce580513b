//! Configuration system for staffplan.
//!
//! Load weights, taxonomy, capacities and solver settings from TOML or YAML
//! files to change a planning run without code changes.
//!
//! # Examples
//!
//! ```
//! use staffplan_config::{BackendKind, StaffplanConfig};
//! use std::time::Duration;
//!
//! let config = StaffplanConfig::from_toml_str(r#"
//!     [weights]
//!     skill = 0.5
//!     desire = 1.0
//!
//!     [capacity]
//!     default = 3
//!
//!     [solver]
//!     backend = "min_cost_flow"
//!     time_limit_ms = 250
//! "#).unwrap();
//!
//! assert_eq!(config.weights.skill, 0.5);
//! // unset weights keep the slider default
//! assert_eq!(config.weights.tenure, 0.25);
//! assert_eq!(config.solver.backend, BackendKind::MinCostFlow);
//! assert_eq!(config.time_limit(), Some(Duration::from_millis(250)));
//! assert_eq!(config.positions().unwrap().len(), 16);
//! ```
//!
//! Use the default config when the file is missing:
//!
//! ```
//! use staffplan_config::StaffplanConfig;
//!
//! let config = StaffplanConfig::load("staffplan.toml").unwrap_or_default();
//! assert_eq!(config.roster.employee_count, 20);
//! ```

use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use staffplan_core::{Position, WeightVector};
use thiserror::Error;

/// Reference departments, in display order.
pub const DEFAULT_DEPARTMENTS: [&str; 4] = ["Sales", "Engineering", "HR", "Accounting"];

/// Reference locations, in distance order.
pub const DEFAULT_LOCATIONS: [&str; 4] = ["Tokyo", "Osaka", "Nagoya", "Fukuoka"];

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main planning configuration.
///
/// Every section is optional in the file; missing sections take defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct StaffplanConfig {
    /// Weights of the custom proposal.
    #[serde(default)]
    pub weights: WeightVector,

    #[serde(default)]
    pub taxonomy: TaxonomyConfig,

    #[serde(default)]
    pub capacity: CapacityConfig,

    #[serde(default)]
    pub solver: SolverConfig,

    /// Synthetic roster parameters.
    #[serde(default)]
    pub roster: RosterConfig,
}

impl StaffplanConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, contains invalid TOML or
    /// fails [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the custom weights.
    pub fn with_weights(mut self, weights: WeightVector) -> Self {
        self.weights = weights;
        self
    }

    /// Sets the optimal-mode backend.
    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.solver.backend = backend;
        self
    }

    /// Sets the optimal-mode time limit.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.solver.time_limit_ms = Some(ms);
        self
    }

    /// Sets the capacity of positions without an override.
    pub fn with_default_capacity(mut self, capacity: u32) -> Self {
        self.capacity.default = capacity;
        self
    }

    /// Adds a capacity override.
    pub fn with_capacity_override(mut self, entry: CapacityOverride) -> Self {
        self.capacity.overrides.push(entry);
        self
    }

    /// Switches to department-only positions.
    pub fn with_department_only(mut self, department_only: bool) -> Self {
        self.taxonomy.department_only = department_only;
        self
    }

    /// Sets the synthetic roster seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.roster.seed = seed;
        self
    }

    /// Sets the synthetic roster size.
    pub fn with_employee_count(mut self, count: usize) -> Self {
        self.roster.employee_count = count;
        self
    }

    /// Returns the optimal-mode time limit, if configured.
    ///
    /// Convenience method that delegates to `solver.time_limit()`.
    pub fn time_limit(&self) -> Option<Duration> {
        self.solver.time_limit()
    }

    /// Checks the configuration for values no run could use.
    ///
    /// Rejects non-finite weights, a non-positive or non-finite distance
    /// scale, empty or duplicated taxonomy lists, and capacity overrides
    /// naming positions the taxonomy does not produce.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        self.taxonomy.validate()?;

        for entry in &self.capacity.overrides {
            if !self.taxonomy.departments.contains(&entry.department) {
                return Err(ConfigError::Invalid(format!(
                    "capacity override names unknown department '{}'",
                    entry.department
                )));
            }
            match (&entry.location, self.taxonomy.department_only) {
                (Some(location), false) if !self.taxonomy.locations.contains(location) => {
                    return Err(ConfigError::Invalid(format!(
                        "capacity override names unknown location '{}'",
                        location
                    )));
                }
                (Some(location), true) => {
                    return Err(ConfigError::Invalid(format!(
                        "capacity override for {}/{} but positions are department-only",
                        entry.department, location
                    )));
                }
                (None, false) => {
                    return Err(ConfigError::Invalid(format!(
                        "capacity override for '{}' needs a location",
                        entry.department
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Builds the candidate positions with capacities applied.
    ///
    /// Department-major cross product of the taxonomy, or one position per
    /// department when `department_only` is set.
    pub fn positions(&self) -> Result<Vec<Position>, ConfigError> {
        self.validate()?;
        let positions = if self.taxonomy.department_only {
            Position::departments(&self.taxonomy.departments)
        } else {
            Position::cross_product(&self.taxonomy.departments, &self.taxonomy.locations)
        };
        Ok(positions
            .into_iter()
            .map(|p| {
                let capacity = self.capacity.capacity_of(&p.department, p.location.as_deref());
                p.with_capacity(capacity)
            })
            .collect())
    }
}

/// Departments, locations and the linear distance scale.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TaxonomyConfig {
    #[serde(default = "default_departments")]
    pub departments: Vec<String>,

    /// Location order; distance grows with the gap between indices.
    #[serde(default = "default_locations")]
    pub locations: Vec<String>,

    #[serde(default = "default_distance_scale")]
    pub distance_scale: f64,

    /// Positions are departments only, with no location and no distance.
    #[serde(default)]
    pub department_only: bool,
}

fn default_departments() -> Vec<String> {
    DEFAULT_DEPARTMENTS.iter().map(|d| d.to_string()).collect()
}

fn default_locations() -> Vec<String> {
    DEFAULT_LOCATIONS.iter().map(|l| l.to_string()).collect()
}

fn default_distance_scale() -> f64 {
    200.0
}

impl Default for TaxonomyConfig {
    fn default() -> Self {
        Self {
            departments: default_departments(),
            locations: default_locations(),
            distance_scale: default_distance_scale(),
            department_only: false,
        }
    }
}

impl TaxonomyConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.distance_scale.is_finite() || self.distance_scale <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "distance_scale must be positive and finite, got {}",
                self.distance_scale
            )));
        }
        check_list("departments", &self.departments)?;
        check_list("locations", &self.locations)
    }
}

fn check_list(name: &str, values: &[String]) -> Result<(), ConfigError> {
    if values.is_empty() {
        return Err(ConfigError::Invalid(format!("{} must not be empty", name)));
    }
    let mut seen = HashSet::with_capacity(values.len());
    match values.iter().find(|v| !seen.insert(v.as_str())) {
        Some(dup) => Err(ConfigError::Invalid(format!(
            "{} lists '{}' twice",
            name, dup
        ))),
        None => Ok(()),
    }
}

/// Position capacities.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CapacityConfig {
    #[serde(default = "default_capacity")]
    pub default: u32,

    #[serde(default)]
    pub overrides: Vec<CapacityOverride>,
}

fn default_capacity() -> u32 {
    2
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            default: default_capacity(),
            overrides: Vec::new(),
        }
    }
}

impl CapacityConfig {
    /// Capacity of one position; the last matching override wins.
    pub fn capacity_of(&self, department: &str, location: Option<&str>) -> u32 {
        self.overrides
            .iter()
            .rev()
            .find(|o| o.department == department && o.location.as_deref() == location)
            .map_or(self.default, |o| o.capacity)
    }
}

/// Capacity of one position.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CapacityOverride {
    pub department: String,

    /// Omitted for department-only positions.
    #[serde(default)]
    pub location: Option<String>,

    pub capacity: u32,
}

impl CapacityOverride {
    pub fn new(department: impl Into<String>, location: impl Into<String>, capacity: u32) -> Self {
        Self {
            department: department.into(),
            location: Some(location.into()),
            capacity,
        }
    }

    pub fn department_only(department: impl Into<String>, capacity: u32) -> Self {
        Self {
            department: department.into(),
            location: None,
            capacity,
        }
    }
}

/// Optimal-mode solver settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    #[serde(default)]
    pub backend: BackendKind,

    #[serde(default)]
    pub time_limit_ms: Option<u64>,
}

impl SolverConfig {
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }
}

/// Exact backend for the capacitated assignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Kuhn-Munkres over capacity-expanded slots.
    #[default]
    Hungarian,

    /// Successive shortest paths on a flow network.
    MinCostFlow,

    /// Binary integer program solved by `good_lp`.
    LinearProgram,
}

impl BackendKind {
    pub fn name(&self) -> &'static str {
        match self {
            BackendKind::Hungarian => "hungarian",
            BackendKind::MinCostFlow => "min_cost_flow",
            BackendKind::LinearProgram => "linear_program",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Synthetic roster parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RosterConfig {
    #[serde(default = "default_employee_count")]
    pub employee_count: usize,

    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_employee_count() -> usize {
    20
}

fn default_seed() -> u64 {
    42
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            employee_count: default_employee_count(),
            seed: default_seed(),
        }
    }
}
