use std::net::SocketAddr;

use server::config::ServerConfig;
use server::rate_limit::{LoginLimiter, RateLimitConfig};
use server::state::AppState;

#[tokio::main]
async fn main() {
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            std::process::exit(2);
        }
    };

    tracing_subscriber::fmt().with_max_level(config.verbosity).init();

    if config.password.is_none() {
        tracing::warn!("PASSWORD not set; any login attempt will be accepted");
    }
    if config.api_token.is_none() {
        tracing::info!("API_TOKEN not set; bearer access disabled");
    }

    let port = config.port;
    let reports_dir = config.reports_dir.display().to_string();
    let state = AppState::new(config, LoginLimiter::new(RateLimitConfig::from_env()));

    let app = server::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, %reports_dir, "doughbox api listening");
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server failed");
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
