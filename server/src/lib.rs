//! Doughbox API server: password sessions and report delivery.

pub mod config;
pub mod error;
pub mod rate_limit;
pub mod routes;
pub mod services;
pub mod state;

pub use routes::app;
pub use state::AppState;
