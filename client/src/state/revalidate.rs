//! When a cached session probe should be refreshed.

#[cfg(test)]
#[path = "revalidate_test.rs"]
mod revalidate_test;

use std::time::{Duration, Instant};

const DEFAULT_DEDUPE_INTERVAL: Duration = Duration::from_secs(2);

/// Event that may cause a re-probe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevalidateTrigger {
    /// A page using the session mounted.
    Mount,
    /// The window regained focus or became visible.
    Focus,
    /// A polling tick.
    Interval,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevalidatePolicy {
    /// Requests within this window reuse the previous result.
    pub dedupe_interval: Duration,
    /// Poll period; `None` disables polling.
    pub refresh_interval: Option<Duration>,
    pub revalidate_on_focus: bool,
}

impl Default for RevalidatePolicy {
    fn default() -> Self {
        Self { dedupe_interval: DEFAULT_DEDUPE_INTERVAL, refresh_interval: None, revalidate_on_focus: true }
    }
}

impl RevalidatePolicy {
    /// Whether `trigger` should re-probe, given when the last probe settled.
    #[must_use]
    pub fn should_revalidate(&self, trigger: RevalidateTrigger, last: Option<Instant>, now: Instant) -> bool {
        let Some(last) = last else {
            return true;
        };
        let age = now.saturating_duration_since(last);
        if age < self.dedupe_interval {
            return false;
        }
        match trigger {
            RevalidateTrigger::Mount => true,
            RevalidateTrigger::Focus => self.revalidate_on_focus,
            RevalidateTrigger::Interval => self.refresh_interval.is_some_and(|every| age >= every),
        }
    }
}
