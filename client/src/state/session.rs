//! Session controller: probe, reconcile, login, logout.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages never decide redirects themselves. They call [`SessionController`]
//! on mount, on focus and after auth actions; the controller runs the
//! session probe, feeds the result to a [`Reconciler`] and applies whatever
//! navigation it returns through the [`Navigator`].
//!
//! DESIGN
//! ======
//! - The probe snapshot is cached and reused inside the dedupe window.
//! - A 401 from the probe or from any resource load is an unauthorized
//!   re-probe: the cache is emptied and the phase drops to
//!   `Unauthenticated`. It is never retried.
//! - Logout empties the cache before it navigates, so a page mounted at
//!   `/login` can never read data fetched under the old session.
//!
//! TRADE-OFFS
//! ==========
//! Methods take `&mut self`, which serializes probes and auth actions per
//! controller. The cache is shared through clones, so other readers still
//! see invalidation immediately.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::time::Instant;

use reqwest::Method;
use serde_json::json;
use session::routes::route_path;
use session::{
    AUTH_STATE_PATH, AuthPhase, LOGIN_PATH, LOGOUT_PATH, Navigation, NavigationReason, ProbeOutcome, Reconciler,
    RetryPolicy, RouteTable, SessionProbe,
};

use super::cache::ResponseCache;
use super::revalidate::{RevalidatePolicy, RevalidateTrigger};
use crate::net::api::ApiClient;
use crate::net::resources::Resource;
use crate::net::types::{FetchError, Payload};
use crate::router::Navigator;

const PASSWORD_FIELD: &str = "password";

/// Why a login attempt did not produce a session.
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// The server refused the credentials. Shown next to `field`.
    #[error("{field}: {message}")]
    Rejected { field: &'static str, message: String },
    #[error(transparent)]
    Request(FetchError),
}

pub struct SessionController<N: Navigator> {
    api: ApiClient,
    cache: ResponseCache,
    reconciler: Reconciler,
    navigator: N,
    policy: RevalidatePolicy,
    retry: RetryPolicy,
    probe: SessionProbe,
    probed_at: Option<Instant>,
}

impl<N: Navigator> SessionController<N> {
    #[must_use]
    pub fn new(api: ApiClient, navigator: N) -> Self {
        Self {
            api,
            cache: ResponseCache::new(),
            reconciler: Reconciler::default(),
            navigator,
            policy: RevalidatePolicy::default(),
            retry: RetryPolicy::default(),
            probe: SessionProbe::pending(),
            probed_at: None,
        }
    }

    #[must_use]
    pub fn with_cache(mut self, cache: ResponseCache) -> Self {
        self.cache = cache;
        self
    }

    #[must_use]
    pub fn with_routes(mut self, routes: RouteTable) -> Self {
        self.reconciler = Reconciler::new(routes);
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: RevalidatePolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    #[must_use]
    pub fn phase(&self) -> AuthPhase {
        self.reconciler.phase()
    }

    /// Latest probe snapshot.
    #[must_use]
    pub fn snapshot(&self) -> SessionProbe {
        self.probe
    }

    #[must_use]
    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    #[must_use]
    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut N {
        &mut self.navigator
    }

    #[must_use]
    pub fn routes(&self) -> &RouteTable {
        self.reconciler.routes()
    }

    /// Redirect the reconciler would issue at `location`, without applying it.
    #[must_use]
    pub fn preview(&self, location: &str) -> Option<Navigation> {
        self.reconciler.target(location)
    }

    // =========================================================================
    // PROBE
    // =========================================================================

    /// Session probe, reusing a settled result inside the dedupe window.
    pub async fn probe(&mut self) -> SessionProbe {
        if let Some(at) = self.probed_at {
            if !self.probe.pending && at.elapsed() < self.policy.dedupe_interval {
                return self.probe;
            }
        }
        self.refresh_probe().await
    }

    /// Probe, retrying transient failures per the retry policy. An
    /// unauthorized answer returns immediately.
    pub async fn probe_with_retry(&mut self) -> SessionProbe {
        let mut probe = self.probe().await;
        let mut attempt = 0;
        while let Some(outcome) = probe.outcome() {
            let Some(delay) = self.retry.next_delay(outcome, attempt) else {
                break;
            };
            tracing::warn!(attempt, ?delay, status = ?probe.failure_status, "session probe failed; retrying");
            tokio::time::sleep(delay).await;
            attempt += 1;
            probe = self.refresh_probe().await;
        }
        probe
    }

    /// Re-probe if `trigger` warrants it. Returns the new snapshot, or `None`
    /// when the cached one still stands.
    pub async fn revalidate(&mut self, trigger: RevalidateTrigger) -> Option<SessionProbe> {
        if !self.policy.should_revalidate(trigger, self.probed_at, Instant::now()) {
            return None;
        }
        Some(self.refresh_probe().await)
    }

    async fn refresh_probe(&mut self) -> SessionProbe {
        self.probe = SessionProbe::pending();
        self.reconciler.observe(&self.probe);
        let outcome = match self.api.fetch(AUTH_STATE_PATH).await {
            Ok(_) => ProbeOutcome::Authenticated,
            Err(err) => {
                if !err.is_unauthorized() {
                    tracing::warn!(error = %err, "session probe failed");
                }
                err.probe_outcome()
            }
        };
        self.settle(outcome)
    }

    fn settle(&mut self, outcome: ProbeOutcome) -> SessionProbe {
        self.probe = SessionProbe::settled(outcome);
        self.probed_at = Some(Instant::now());
        let transition = self.reconciler.observe(&self.probe);
        if self.probe.is_unauthorized() {
            self.invalidate("unauthorized");
        }
        if transition.changed() {
            tracing::info!(from = %transition.from, to = %transition.to, "session phase changed");
        }
        tracing::debug!(?outcome, phase = %self.reconciler.phase(), "session probe settled");
        self.probe
    }

    fn invalidate(&self, reason: &str) {
        let removed = self.cache.clear();
        tracing::debug!(%reason, removed, "response cache cleared");
    }

    // =========================================================================
    // RECONCILE
    // =========================================================================

    /// Apply the reconciler's decision for the current location, if any.
    pub fn reconcile(&mut self) -> Option<Navigation> {
        let location = self.navigator.location().to_owned();
        let nav = self.reconciler.decide(&location)?;
        self.apply(&nav);
        Some(nav)
    }

    /// Move to `location` as the user would, then reconcile.
    pub fn visit(&mut self, location: &str) -> Option<Navigation> {
        self.navigator.navigate(location);
        self.reconcile()
    }

    fn apply(&mut self, nav: &Navigation) {
        tracing::info!(from = %nav.from, to = %nav.to, reason = ?nav.reason, "redirect");
        self.navigator.navigate(&nav.to);
        self.reconciler.applied();
    }

    /// Navigate to `to` unless already there.
    fn redirect(&mut self, to: &str, reason: NavigationReason) -> Option<Navigation> {
        let from = self.navigator.location().to_owned();
        if route_path(&from) == route_path(to) {
            return None;
        }
        let nav = Navigation { from, to: to.to_owned(), reason };
        self.apply(&nav);
        Some(nav)
    }

    // =========================================================================
    // AUTH ACTIONS
    // =========================================================================

    /// Log in with `password`. On success the cache is emptied, the phase
    /// becomes `Authenticated`, the next probe refetches and the router moves
    /// to the landing route.
    ///
    /// # Errors
    ///
    /// [`LoginError::Rejected`] when the server refuses the attempt,
    /// [`LoginError::Request`] when it cannot be reached. Neither changes
    /// the cache or the location.
    pub async fn login(&mut self, password: &str) -> Result<Option<Navigation>, LoginError> {
        match self.api.send_mutate(LOGIN_PATH, &json!({ "password": password }), Method::POST).await {
            Ok(()) => {}
            Err(FetchError::Api(err)) if (400..500).contains(&err.status) => {
                tracing::debug!(status = err.status, error = %err.error, "login rejected");
                return Err(LoginError::Rejected { field: PASSWORD_FIELD, message: err.message });
            }
            Err(err) => return Err(LoginError::Request(err)),
        }

        self.invalidate("login");
        self.reconciler.signed_in();
        self.probe = SessionProbe::settled(ProbeOutcome::Authenticated);
        self.probed_at = None;
        tracing::info!("signed in");

        let landing = self.routes().landing.clone();
        Ok(self.redirect(&landing, NavigationReason::SignedIn))
    }

    /// Log out. On success the cache is emptied first, then the phase
    /// becomes `Unauthenticated`, then the router moves to the login route.
    ///
    /// # Errors
    ///
    /// Returns the request error unchanged; nothing is cleared or moved.
    pub async fn logout(&mut self) -> Result<Option<Navigation>, FetchError> {
        self.api.send_mutate(LOGOUT_PATH, &json!({}), Method::POST).await?;

        self.invalidate("logout");
        self.reconciler.signed_out();
        self.probe = SessionProbe::settled(ProbeOutcome::Unauthorized);
        self.probed_at = None;
        tracing::info!("signed out");

        let login = self.routes().login.clone();
        Ok(self.redirect(&login, NavigationReason::SignedOut))
    }

    // =========================================================================
    // DATA
    // =========================================================================

    /// Load a dashboard resource through the cache.
    ///
    /// # Errors
    ///
    /// The fetch error. A 401 additionally settles the session as
    /// unauthorized, which empties the cache.
    pub async fn load(&mut self, resource: &Resource) -> Result<Payload, FetchError> {
        let key = resource.path();
        if let Some(payload) = self.cache.get_fresh(&key, self.policy.dedupe_interval) {
            return Ok(payload);
        }
        let generation = self.cache.generation();
        match self.api.fetch(&key).await {
            Ok(payload) => {
                self.cache.insert_if_current(&key, payload.clone(), generation);
                Ok(payload)
            }
            Err(err) => {
                if err.is_unauthorized() {
                    tracing::info!(%resource, "resource load unauthorized");
                    self.settle(ProbeOutcome::Unauthorized);
                }
                Err(err)
            }
        }
    }
}
