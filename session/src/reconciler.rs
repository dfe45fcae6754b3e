//! Session/redirect reconciler.
//!
//! DESIGN
//! ======
//! The reconciler holds the current [`AuthPhase`] and decides, for a given
//! client location, whether the router has to move. Phase changes come from
//! three sources: settled probes ([`Reconciler::observe`]), a successful
//! login ([`Reconciler::signed_in`]) and a successful logout
//! ([`Reconciler::signed_out`]).
//!
//! Rules, evaluated only once the latest probe has settled:
//! - `Authenticated` at the login route or root: go to the landing route.
//! - `Unauthenticated` under the protected prefix or at root: go to login.
//! - Everything else stays put, including every location while `Unknown`.
//!
//! A navigation is issued once per (phase, origin) until the router reports
//! it applied, so re-running `decide` during an in-flight redirect cannot
//! stack duplicate history entries.

#[cfg(test)]
#[path = "reconciler_test.rs"]
mod tests;

use serde::Serialize;

use crate::phase::{AuthPhase, SessionProbe, Transition};
use crate::routes::{RouteTable, route_path};

/// Why a navigation was issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationReason {
    /// Session is live; leave login/root for the landing route.
    SignedIn,
    /// Session is gone; leave protected routes for login.
    SignedOut,
}

/// A redirect the router should perform.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub from: String,
    pub to: String,
    pub reason: NavigationReason,
}

#[derive(Clone, Debug)]
pub struct Reconciler {
    routes: RouteTable,
    phase: AuthPhase,
    pending: bool,
    in_flight: Option<(AuthPhase, Navigation)>,
}

impl Reconciler {
    #[must_use]
    pub fn new(routes: RouteTable) -> Self {
        Self { routes, phase: AuthPhase::Unknown, pending: true, in_flight: None }
    }

    #[must_use]
    pub fn phase(&self) -> AuthPhase {
        self.phase
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    #[must_use]
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Feed the latest probe snapshot into the state machine.
    ///
    /// A pending snapshot freezes decisions but keeps the current phase, so a
    /// background revalidation never flickers the UI back to `Unknown`.
    pub fn observe(&mut self, probe: &SessionProbe) -> Transition {
        self.pending = probe.pending;
        let next = probe.phase_hint().unwrap_or(self.phase);
        self.enter(next)
    }

    /// Apply a successful login.
    pub fn signed_in(&mut self) -> Transition {
        self.pending = false;
        self.enter(AuthPhase::Authenticated)
    }

    /// Apply a successful logout.
    pub fn signed_out(&mut self) -> Transition {
        self.pending = false;
        self.enter(AuthPhase::Unauthenticated)
    }

    fn enter(&mut self, next: AuthPhase) -> Transition {
        let transition = Transition { from: self.phase, to: next };
        if transition.changed() {
            self.phase = next;
            self.in_flight = None;
        }
        transition
    }

    /// Navigation required at `location`, if any, without bookkeeping.
    #[must_use]
    pub fn target(&self, location: &str) -> Option<Navigation> {
        if self.pending {
            return None;
        }
        let routes = &self.routes;
        let (to, reason) = match self.phase {
            AuthPhase::Unknown => return None,
            AuthPhase::Authenticated if routes.is_login(location) || routes.is_root(location) => {
                (routes.landing.clone(), NavigationReason::SignedIn)
            }
            AuthPhase::Unauthenticated if routes.is_protected(location) || routes.is_root(location) => {
                (routes.login.clone(), NavigationReason::SignedOut)
            }
            AuthPhase::Authenticated | AuthPhase::Unauthenticated => return None,
        };
        if route_path(location) == to {
            return None;
        }
        Some(Navigation { from: location.to_owned(), to, reason })
    }

    /// Decide the redirect for `location`, suppressing one already in flight.
    pub fn decide(&mut self, location: &str) -> Option<Navigation> {
        if let Some((_, nav)) = &self.in_flight {
            if route_path(location) == route_path(&nav.to) {
                self.in_flight = None;
            }
        }
        let nav = self.target(location)?;
        let duplicate = self
            .in_flight
            .as_ref()
            .is_some_and(|(phase, issued)| *phase == self.phase && issued.from == nav.from);
        if duplicate {
            return None;
        }
        self.in_flight = Some((self.phase, nav.clone()));
        Some(nav)
    }

    /// Mark the in-flight navigation as applied by the router.
    pub fn applied(&mut self) {
        self.in_flight = None;
    }
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new(RouteTable::default())
    }
}
