//! Session model shared by the Doughbox API server and its clients.
//!
//! This crate owns the auth state machine that keeps a client's route in
//! step with what the server reports from `GET /api/auth_state`. It does no
//! I/O: callers feed it probe results and the current location, and it
//! answers with transitions and navigation decisions.
//!
//! SYSTEM CONTEXT
//! ==============
//! `server` uses [`ApiError`] as its JSON error body. `client` uses the same
//! type to normalize failed responses and drives a [`Reconciler`] from its
//! `SessionController`.

pub mod error;
pub mod phase;
pub mod reconciler;
pub mod retry;
pub mod routes;

pub use error::{ApiError, ErrorDetails};
pub use phase::{AuthPhase, ProbeOutcome, SessionProbe, Transition};
pub use reconciler::{Navigation, NavigationReason, Reconciler};
pub use retry::RetryPolicy;
pub use routes::RouteTable;

/// Path of the session probe endpoint, relative to the API base.
pub const AUTH_STATE_PATH: &str = "/api/auth_state";
/// Path of the password login endpoint.
pub const LOGIN_PATH: &str = "/api/login";
/// Path of the logout endpoint.
pub const LOGOUT_PATH: &str = "/api/logout";
/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE_NAME: &str = "session_token";
