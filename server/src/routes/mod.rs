//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything under `/api` is JSON. `/api/login` and `/api/logout` are
//! public; every other API route sits behind [`auth::check_auth`]. Any path
//! outside `/api` falls through to the static front-end build.

pub mod auth;
pub mod reports;

use axum::Router;
use axum::http::{Method, StatusCode, header};
use axum::middleware;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let public_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout));

    let protected_routes = Router::new()
        .route("/auth_state", get(auth::auth_state))
        .route("/portfolio", get(reports::portfolio))
        .route("/pl", get(reports::pl))
        .route("/performance", get(reports::performance))
        .route("/dividends", get(reports::dividends))
        .route("/taxation", get(reports::taxation))
        .route("/positions", get(reports::positions))
        .route("/timeline", get(reports::timeline))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::check_auth));

    let static_files = ServeDir::new(&state.config.static_dir).append_index_html_on_directories(true);

    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .route("/healthz", get(healthz))
        .fallback_service(static_files)
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
