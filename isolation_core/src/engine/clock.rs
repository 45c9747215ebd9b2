use crate::engine::SearchTimeout;
use std::time::{Duration, Instant};

/// Source of the milliseconds left in the current turn.
///
/// The game clock owns the budget; the search only reads it, once per
/// recursive entry, so reads must be cheap and free of side effects that
/// matter to the caller.
pub trait TimeBudget {
    fn time_left(&self) -> f64;
}

impl<F> TimeBudget for F
where
    F: Fn() -> f64,
{
    fn time_left(&self) -> f64 {
        self()
    }
}

/// Wall-clock budget that runs out `limit` after it was started.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Instant,
    limit: Duration,
}

impl Deadline {
    #[must_use]
    pub fn after(limit: Duration) -> Self {
        Self {
            start: Instant::now(),
            limit,
        }
    }

    #[must_use]
    pub fn after_millis(millis: u64) -> Self {
        Self::after(Duration::from_millis(millis))
    }
}

impl TimeBudget for Deadline {
    fn time_left(&self) -> f64 {
        let elapsed = self.start.elapsed().as_secs_f64() * 1000.0;
        self.limit.as_secs_f64().mul_add(1000.0, -elapsed)
    }
}

/// Budget that never runs out. Handy for fixed-depth analysis.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unlimited;

impl TimeBudget for Unlimited {
    fn time_left(&self) -> f64 {
        f64::INFINITY
    }
}

/// Fails with `SearchTimeout` once fewer than `threshold_ms` remain.
pub fn check_time(budget: &dyn TimeBudget, threshold_ms: f64) -> Result<(), SearchTimeout> {
    if budget.time_left() < threshold_ms {
        return Err(SearchTimeout);
    }
    Ok(())
}
