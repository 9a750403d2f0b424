//! Wall-clock search budget.

use std::time::Duration;

use super::Termination;
use crate::stats::SearchStats;

/// Stops the search once it has run for `limit`.
///
/// Elapsed time is measured from [`SearchStats::start`]; a search whose stats
/// were never started counts as zero elapsed.
///
/// # Example
///
/// ```
/// use relicforge_solver::termination::{Termination, TimeTermination};
/// use relicforge_solver::SearchStats;
///
/// let mut stats = SearchStats::default();
/// stats.start();
///
/// let budget = TimeTermination::seconds(30);
/// assert!(!budget.is_terminated(&stats));
/// assert_eq!(TimeTermination::millis(250).limit().as_millis(), 250);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeTermination {
    limit: Duration,
}

impl TimeTermination {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn seconds(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    /// The configured budget.
    pub fn limit(&self) -> Duration {
        self.limit
    }
}

impl Termination for TimeTermination {
    fn is_terminated(&self, stats: &SearchStats) -> bool {
        stats.elapsed() >= self.limit
    }
}
