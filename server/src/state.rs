//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! carries the parsed configuration, the live session store and the login
//! rate limiter. Everything inside is cheap to clone.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::rate_limit::LoginLimiter;
use crate::services::session::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub sessions: SessionStore,
    pub login_limiter: LoginLimiter,
}

impl AppState {
    #[must_use]
    pub fn new(config: ServerConfig, login_limiter: LoginLimiter) -> Self {
        Self { config: Arc::new(config), sessions: SessionStore::default(), login_limiter }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

pub mod test_helpers {
    use std::path::Path;

    use tracing::Level;

    use super::*;
    use crate::rate_limit::RateLimitConfig;

    /// Config rooted at `reports_dir`, with no static directory on disk.
    #[must_use]
    pub fn test_config(reports_dir: &Path, password: Option<&str>, api_token: Option<&str>) -> ServerConfig {
        ServerConfig {
            port: 0,
            password: password.map(str::to_owned),
            api_token: api_token.map(str::to_owned),
            reports_dir: reports_dir.to_path_buf(),
            static_dir: reports_dir.join("dist"),
            cookie_secure: false,
            trust_forwarded_for: false,
            verbosity: Level::DEBUG,
        }
    }

    #[must_use]
    pub fn test_app_state(reports_dir: &Path, password: Option<&str>) -> AppState {
        AppState::new(test_config(reports_dir, password, None), LoginLimiter::new(RateLimitConfig::default()))
    }
}
