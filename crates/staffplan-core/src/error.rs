//! Error types for staffplan

use thiserror::Error;

/// Main error type for staffplan operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StaffplanError {
    /// A location identifier is not known to the compatibility model
    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    /// A weight is NaN or infinite
    #[error("Invalid weight '{name}': {value}")]
    InvalidWeight { name: &'static str, value: f64 },

    /// Malformed roster, position list or score records
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No assignment satisfies the capacity constraints
    #[error("Infeasible: {0}")]
    Infeasible(String),

    /// The optimization backend produced no verifiable optimum
    #[error("Solver failure: {0}")]
    SolverFailure(String),

    /// The solve exceeded its time limit
    #[error("Solve timed out after {elapsed_ms} ms")]
    Timeout { elapsed_ms: u64 },
}

/// Result type alias for staffplan operations
pub type Result<T> = std::result::Result<T, StaffplanError>;
