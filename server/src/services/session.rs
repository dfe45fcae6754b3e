//! Session token management.
//!
//! ARCHITECTURE
//! ============
//! Doughbox is single-user: a session is nothing more than a random token
//! handed out on a successful password login. Tokens live in memory and
//! expire after a period of inactivity; every validated request slides the
//! expiry forward.
//!
//! TRADE-OFFS
//! ==========
//! Restarting the server logs everyone out. That matches the in-memory
//! session store the dashboard has always used and avoids persisting
//! credentials on disk.

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use rand::Rng;

/// Sessions expire after 90 days without a request.
pub const SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(60 * 60 * 24 * 90);

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// In-memory session store shared across handlers.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<String, Instant>>>,
    idle_timeout: Duration,
}

impl SessionStore {
    #[must_use]
    pub fn new(idle_timeout: Duration) -> Self {
        Self { inner: Arc::new(Mutex::new(HashMap::new())), idle_timeout }
    }

    #[must_use]
    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// Create a session, returning its token.
    pub fn create(&self) -> String {
        self.create_at(Instant::now())
    }

    fn create_at(&self, now: Instant) -> String {
        let token = generate_token();
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        prune_expired(&mut inner, now, self.idle_timeout);
        inner.insert(token.clone(), now);
        token
    }

    /// Validate a token and slide its expiry forward.
    pub fn touch(&self, token: &str) -> bool {
        self.touch_at(token, Instant::now())
    }

    fn touch_at(&self, token: &str, now: Instant) -> bool {
        if token.is_empty() {
            return false;
        }
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let Some(last_seen) = inner.get_mut(token) else {
            return false;
        };
        if now.duration_since(*last_seen) <= self.idle_timeout {
            *last_seen = now;
            return true;
        }
        inner.remove(token);
        false
    }

    /// Delete a session. Unknown tokens are ignored.
    pub fn delete(&self, token: &str) -> bool {
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        inner.remove(token).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(SESSION_IDLE_TIMEOUT)
    }
}

fn prune_expired(sessions: &mut HashMap<String, Instant>, now: Instant, idle_timeout: Duration) {
    sessions.retain(|_, last_seen| now.duration_since(*last_seen) <= idle_timeout);
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
