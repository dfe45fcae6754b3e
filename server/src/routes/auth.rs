//! Auth routes: password login, logout, session probe and the guard
//! middleware for protected routes.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use session::{ApiError, SESSION_COOKIE_NAME};

use crate::error::ErrorResponse;
use crate::services::auth::{self as auth_svc, PasswordCheck};
use crate::state::AppState;

const FORWARDED_FOR: &str = "x-forwarded-for";

/// Key used to rate-limit login attempts: the peer IP, or the first
/// forwarded address when the deployment sits behind a trusted proxy.
pub(crate) fn client_key(headers: &HeaderMap, peer: SocketAddr, trust_forwarded_for: bool) -> String {
    let forwarded = trust_forwarded_for
        .then(|| headers.get(FORWARDED_FOR))
        .flatten()
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    match forwarded {
        Some(addr) => addr.to_owned(),
        None => peer.ip().to_string(),
    }
}

fn session_cookie(token: String, secure: bool, max_age: std::time::Duration) -> Cookie<'static> {
    let max_age_secs = i64::try_from(max_age.as_secs()).unwrap_or(i64::MAX);
    Cookie::build((SESSION_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(time::Duration::seconds(max_age_secs))
        .build()
}

fn expired_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(time::Duration::ZERO)
        .build()
}

// =============================================================================
// MIDDLEWARE
// =============================================================================

/// Admit requests carrying a live session cookie or the configured bearer
/// token; everything else gets a 401 error body.
pub async fn check_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Result<Response, ErrorResponse> {
    let token = jar.get(SESSION_COOKIE_NAME).map(Cookie::value).unwrap_or_default();
    if state.sessions.touch(token) {
        return Ok(next.run(request).await);
    }

    let header = request.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    if auth_svc::bearer_matches(header, state.config.api_token.as_deref()) {
        return Ok(next.run(request).await);
    }

    tracing::debug!(path = %request.uri().path(), "rejecting unauthenticated request");
    Err(ErrorResponse(ApiError::unauthorized()))
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// `POST /api/login`: verify the password and issue a session cookie.
pub async fn login(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, StatusCode), ErrorResponse> {
    let client = client_key(&headers, peer, state.config.trust_forwarded_for);
    let attempt = match state.login_limiter.check_and_record(&client) {
        Ok(attempt) => attempt,
        Err(e) => {
            tracing::warn!(%client, error = %e, "login rate limited");
            return Err(ErrorResponse(ApiError::new(
                StatusCode::TOO_MANY_REQUESTS.as_u16(),
                "TooManyAttempts",
                &e.to_string(),
            )));
        }
    };

    let check = auth_svc::check_password(state.config.password.as_deref(), &payload.password);
    if !check.is_accepted() {
        tracing::warn!(%client, "login rejected");
        return Err(ErrorResponse(ApiError::new(
            StatusCode::UNAUTHORIZED.as_u16(),
            "InvalidPassword",
            "The password is incorrect.",
        )));
    }

    state.login_limiter.forgive(&client, attempt);
    let token = state.sessions.create();
    tracing::info!(%client, open = check == PasswordCheck::Open, "session issued");

    let cookie = session_cookie(token, state.config.cookie_secure, state.sessions.idle_timeout());
    Ok((jar.add(cookie), StatusCode::OK))
}

/// `POST /api/logout`: drop the session and clear the cookie. Idempotent.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(cookie) = jar.get(SESSION_COOKIE_NAME) {
        if state.sessions.delete(cookie.value()) {
            tracing::info!("session ended");
        }
    }

    let jar = CookieJar::new().add(expired_cookie(state.config.cookie_secure));
    (jar, StatusCode::OK)
}

/// `GET /api/auth_state`: only reachable through [`check_auth`].
pub async fn auth_state() -> impl IntoResponse {
    (StatusCode::OK, "authenticated")
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
