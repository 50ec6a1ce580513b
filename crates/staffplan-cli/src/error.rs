//! CLI error type.

use staffplan::{ConfigError, PlanError, StaffplanError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Plan(#[from] StaffplanError),
}

impl From<PlanError> for CliError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::Config(e) => CliError::Config(e),
            PlanError::Plan(e) => CliError::Plan(e),
        }
    }
}
