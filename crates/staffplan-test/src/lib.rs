//! Shared test fixtures for staffplan crates.
//!
//! This crate provides data and pure functions for testing.
//! It depends on `staffplan-core` only, so every other crate can use it as a
//! dev-dependency without cycles.
//!
//! - [`scenario`] - the worked two-position example and a small roster
//! - [`brute_force`] - exhaustive reference solver for capacitated assignment
//! - [`random`] - seeded random score instances
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! staffplan-test = { workspace = true }
//! ```

pub mod brute_force;
pub mod random;
pub mod scenario;

pub use brute_force::{brute_force_best, brute_force_records, BruteForceOptimum};
pub use random::{random_instance, RandomInstance};
pub use scenario::{reference_example, small_roster, ReferenceExample, DEPARTMENTS, LOCATIONS};
