//! Time limits for the optimal solve.

use std::time::{Duration, Instant};

use staffplan_core::{Result, StaffplanError};

/// Wall-clock limit measured from construction.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use staffplan_solver::Deadline;
///
/// let unlimited = Deadline::unlimited();
/// assert!(unlimited.check().is_ok());
///
/// let generous = Deadline::new(Duration::from_secs(60));
/// assert!(generous.check().is_ok());
///
/// // A zero limit is already spent
/// assert!(Deadline::millis(0).check().is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Instant,
    limit: Option<Duration>,
}

impl Deadline {
    pub fn new(limit: Duration) -> Self {
        Self::from_limit(Some(limit))
    }

    pub fn millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn unlimited() -> Self {
        Self::from_limit(None)
    }

    pub fn from_limit(limit: Option<Duration>) -> Self {
        Self {
            start: Instant::now(),
            limit,
        }
    }

    pub fn limit(&self) -> Option<Duration> {
        self.limit
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn is_expired(&self) -> bool {
        self.limit.is_some_and(|limit| self.elapsed() >= limit)
    }

    /// Returns `Timeout` once the limit has been reached.
    pub fn check(&self) -> Result<()> {
        if self.is_expired() {
            return Err(StaffplanError::Timeout {
                elapsed_ms: self.elapsed().as_millis() as u64,
            });
        }
        Ok(())
    }
}

impl Default for Deadline {
    fn default() -> Self {
        Self::unlimited()
    }
}
