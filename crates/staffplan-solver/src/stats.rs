//! Solve statistics.

use std::time::{Duration, Instant};

/// Metrics for one optimal solve.
///
/// # Example
///
/// ```
/// use staffplan_solver::SolveStats;
///
/// let mut stats = SolveStats::default();
/// stats.start();
/// stats.record_augmentation();
/// stats.record_relaxations(12);
/// stats.finish();
///
/// assert_eq!(stats.augmentations, 1);
/// assert_eq!(stats.relaxations, 12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SolveStats {
    start_time: Option<Instant>,
    finished: Option<Duration>,
    /// Employees to place.
    pub rows: usize,
    /// Candidate positions.
    pub columns: usize,
    /// Pairs with a score record.
    pub admissible_edges: usize,
    /// Augmenting paths found by the backend.
    pub augmentations: u64,
    /// Label or distance updates performed while searching for paths.
    pub relaxations: u64,
}

impl SolveStats {
    /// Marks the start of solving.
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
        self.finished = None;
    }

    /// Freezes the elapsed time.
    pub fn finish(&mut self) {
        self.finished = Some(self.elapsed());
    }

    /// Time since [`start`](Self::start), or the frozen time after [`finish`](Self::finish).
    pub fn elapsed(&self) -> Duration {
        self.finished
            .or_else(|| self.start_time.map(|t| t.elapsed()))
            .unwrap_or_default()
    }

    pub fn record_augmentation(&mut self) {
        self.augmentations += 1;
    }

    pub fn record_relaxations(&mut self, count: u64) {
        self.relaxations += count;
    }

    /// Share of all (row, column) pairs that are admissible.
    pub fn density(&self) -> f64 {
        let pairs = self.rows * self.columns;
        if pairs == 0 {
            0.0
        } else {
            self.admissible_edges as f64 / pairs as f64
        }
    }
}
