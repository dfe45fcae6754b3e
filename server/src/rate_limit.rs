//! In-memory rate limiting for failed login attempts.
//!
//! DESIGN
//! ======
//! Sliding-window counters backed by `HashMap<String, VecDeque<Instant>>`.
//! Two limits are enforced on *failed* attempts only:
//! - Per-client: 5 failures/min
//! - Global: 50 failures/min
//!
//! Every attempt is recorded up front; a successful login hands its slot
//! back, so a user who mistypes once is not locked out for the rest of the
//! window.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::config::env_parse;

const DEFAULT_PER_CLIENT_LIMIT: usize = 5;
const DEFAULT_PER_CLIENT_WINDOW_SECS: u64 = 60;

const DEFAULT_GLOBAL_LIMIT: usize = 50;
const DEFAULT_GLOBAL_WINDOW_SECS: u64 = 60;

#[derive(Clone, Copy, Debug)]
pub struct RateLimitConfig {
    pub per_client_limit: usize,
    pub per_client_window: Duration,
    pub global_limit: usize,
    pub global_window: Duration,
}

impl RateLimitConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let per_client_window_secs = env_parse("LOGIN_LIMIT_PER_CLIENT_WINDOW_SECS", DEFAULT_PER_CLIENT_WINDOW_SECS);
        let global_window_secs = env_parse("LOGIN_LIMIT_GLOBAL_WINDOW_SECS", DEFAULT_GLOBAL_WINDOW_SECS);

        Self {
            per_client_limit: env_parse("LOGIN_LIMIT_PER_CLIENT", DEFAULT_PER_CLIENT_LIMIT),
            per_client_window: Duration::from_secs(per_client_window_secs),
            global_limit: env_parse("LOGIN_LIMIT_GLOBAL", DEFAULT_GLOBAL_LIMIT),
            global_window: Duration::from_secs(global_window_secs),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_client_limit: DEFAULT_PER_CLIENT_LIMIT,
            per_client_window: Duration::from_secs(DEFAULT_PER_CLIENT_WINDOW_SECS),
            global_limit: DEFAULT_GLOBAL_LIMIT,
            global_window: Duration::from_secs(DEFAULT_GLOBAL_WINDOW_SECS),
        }
    }
}

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum RateLimitError {
    #[error("too many failed logins from this client (max {limit}/{window_secs}s)")]
    PerClientExceeded { limit: usize, window_secs: u64 },
    #[error("too many failed logins (max {limit}/{window_secs}s)")]
    GlobalExceeded { limit: usize, window_secs: u64 },
}

// =============================================================================
// RATE LIMITER
// =============================================================================

#[derive(Clone)]
pub struct LoginLimiter {
    inner: std::sync::Arc<Mutex<LoginLimiterInner>>,
    config: RateLimitConfig,
}

struct LoginLimiterInner {
    /// Per-client failure timestamps.
    client_failures: HashMap<String, VecDeque<Instant>>,
    /// Global failure timestamps.
    global_failures: VecDeque<Instant>,
}

impl LoginLimiter {
    #[must_use]
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            inner: std::sync::Arc::new(Mutex::new(LoginLimiterInner {
                client_failures: HashMap::new(),
                global_failures: VecDeque::new(),
            })),
            config,
        }
    }

    /// Check whether `client` may attempt a login right now and, if so,
    /// count the attempt as a failure until [`LoginLimiter::forgive`] says
    /// otherwise. Check and record happen under one lock, so concurrent
    /// attempts cannot all slip past the limit.
    pub fn check_and_record(&self, client: &str) -> Result<Instant, RateLimitError> {
        self.check_and_record_at(client, Instant::now())
    }

    fn check_and_record_at(&self, client: &str, now: Instant) -> Result<Instant, RateLimitError> {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let cfg = self.config;

        prune_window(&mut inner.global_failures, now, cfg.global_window);
        if inner.global_failures.len() >= cfg.global_limit {
            return Err(RateLimitError::GlobalExceeded {
                limit: cfg.global_limit,
                window_secs: cfg.global_window.as_secs(),
            });
        }

        // Stale clients are dropped so the map only holds live windows.
        inner.client_failures.retain(|_, deque| {
            prune_window(deque, now, cfg.per_client_window);
            !deque.is_empty()
        });

        let client_deque = inner.client_failures.entry(client.to_owned()).or_default();
        if client_deque.len() >= cfg.per_client_limit {
            return Err(RateLimitError::PerClientExceeded {
                limit: cfg.per_client_limit,
                window_secs: cfg.per_client_window.as_secs(),
            });
        }

        client_deque.push_back(now);
        inner.global_failures.push_back(now);
        Ok(now)
    }

    /// Undo the attempt recorded at `attempt` after `client` logs in
    /// successfully, and forget the client's earlier failures.
    pub fn forgive(&self, client: &str, attempt: Instant) {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        inner.client_failures.remove(client);
        if let Some(pos) = inner.global_failures.iter().rposition(|at| *at == attempt) {
            inner.global_failures.remove(pos);
        }
    }

    #[cfg(test)]
    fn tracked_clients(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .client_failures
            .len()
    }
}

impl Default for LoginLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn prune_window(deque: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while let Some(&front) = deque.front() {
        if now.duration_since(front) > window {
            deque.pop_front();
        } else {
            break;
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[path = "rate_limit_test.rs"]
mod tests;
