//! Retry schedule for failed session probes.

#[cfg(test)]
#[path = "retry_test.rs"]
mod tests;

use std::time::Duration;

use crate::phase::ProbeOutcome;

const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_BASE_INTERVAL: Duration = Duration::from_secs(5);
const DEFAULT_MAX_INTERVAL: Duration = Duration::from_secs(60);

/// Exponential backoff for transient probe failures.
///
/// Only [`ProbeOutcome::Failed`] is retried. A 401 is an answer, not a fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries allowed after the first request.
    pub max_attempts: u32,
    pub base_interval: Duration,
    pub max_interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_interval: DEFAULT_BASE_INTERVAL,
            max_interval: DEFAULT_MAX_INTERVAL,
        }
    }
}

impl RetryPolicy {
    /// Policy that never retries.
    #[must_use]
    pub fn never() -> Self {
        Self { max_attempts: 0, ..Self::default() }
    }

    /// Delay before retry number `attempt` (0-based), or `None` to stop.
    #[must_use]
    pub fn next_delay(&self, outcome: ProbeOutcome, attempt: u32) -> Option<Duration> {
        match outcome {
            ProbeOutcome::Authenticated | ProbeOutcome::Unauthorized => None,
            ProbeOutcome::Failed { .. } if attempt >= self.max_attempts => None,
            ProbeOutcome::Failed { .. } => {
                let factor = 1_u32.checked_shl(attempt).unwrap_or(u32::MAX);
                Some(self.base_interval.saturating_mul(factor).min(self.max_interval))
            }
        }
    }
}
