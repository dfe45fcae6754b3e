//! Auth phases and the probe snapshot they are derived from.

#[cfg(test)]
#[path = "phase_test.rs"]
mod tests;

use std::fmt;

use serde::{Deserialize, Serialize};

/// HTTP status the server uses for a missing or expired session.
pub const UNAUTHORIZED_STATUS: u16 = 401;
/// Status reported for transport failures that never produced a response.
pub const NETWORK_FAILURE_STATUS: u16 = 500;

/// Where the client believes the session stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthPhase {
    /// No probe has settled yet.
    #[default]
    Unknown,
    Authenticated,
    Unauthenticated,
}

impl AuthPhase {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Authenticated => "authenticated",
            Self::Unauthenticated => "unauthenticated",
        }
    }

    #[must_use]
    pub fn is_settled(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for AuthPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified result of a single `auth_state` request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// The server answered 2xx.
    Authenticated,
    /// The server answered 401. Terminal for this probe; never retried.
    Unauthorized,
    /// Any other status, or a transport failure reported as 500.
    Failed { status: u16 },
}

impl ProbeOutcome {
    /// Classify an HTTP status code.
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        match status {
            200..=299 => Self::Authenticated,
            UNAUTHORIZED_STATUS => Self::Unauthorized,
            status => Self::Failed { status },
        }
    }

    /// Outcome for a request that never got a response.
    #[must_use]
    pub fn network_failure() -> Self {
        Self::Failed { status: NETWORK_FAILURE_STATUS }
    }

    #[must_use]
    pub fn failure_status(self) -> Option<u16> {
        match self {
            Self::Authenticated => None,
            Self::Unauthorized => Some(UNAUTHORIZED_STATUS),
            Self::Failed { status } => Some(status),
        }
    }
}

/// Snapshot of the session probe as the UI layer sees it.
///
/// `authenticated` is derived: it is false only when the probe settled with
/// an unauthorized status. A pending probe or one that failed for any other
/// reason still reads as authenticated, so a flaky network never looks like
/// a logout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionProbe {
    pub pending: bool,
    pub authenticated: bool,
    pub failure_status: Option<u16>,
}

impl SessionProbe {
    /// A probe whose request has not completed.
    #[must_use]
    pub const fn pending() -> Self {
        Self { pending: true, authenticated: true, failure_status: None }
    }

    /// A probe that completed with the given outcome.
    #[must_use]
    pub fn settled(outcome: ProbeOutcome) -> Self {
        Self {
            pending: false,
            authenticated: !matches!(outcome, ProbeOutcome::Unauthorized),
            failure_status: outcome.failure_status(),
        }
    }

    /// The outcome this snapshot settled with, `None` while pending.
    #[must_use]
    pub fn outcome(&self) -> Option<ProbeOutcome> {
        if self.pending {
            return None;
        }
        Some(match self.failure_status {
            None => ProbeOutcome::Authenticated,
            Some(status) => ProbeOutcome::from_status(status),
        })
    }

    /// Phase implied by this snapshot alone.
    ///
    /// Pending probes and non-401 failures imply nothing: the previous phase
    /// stands.
    #[must_use]
    pub fn phase_hint(&self) -> Option<AuthPhase> {
        match self.outcome()? {
            ProbeOutcome::Authenticated => Some(AuthPhase::Authenticated),
            ProbeOutcome::Unauthorized => Some(AuthPhase::Unauthenticated),
            ProbeOutcome::Failed { .. } => None,
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        !self.pending && !self.authenticated
    }
}

impl Default for SessionProbe {
    fn default() -> Self {
        Self::pending()
    }
}

/// A phase change produced by the state machine. `from == to` means no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: AuthPhase,
    pub to: AuthPhase,
}

impl Transition {
    #[must_use]
    pub fn changed(self) -> bool {
        self.from != self.to
    }

    #[must_use]
    pub fn entered_authenticated(self) -> bool {
        self.changed() && self.to == AuthPhase::Authenticated
    }

    #[must_use]
    pub fn entered_unauthenticated(self) -> bool {
        self.changed() && self.to == AuthPhase::Unauthenticated
    }
}
