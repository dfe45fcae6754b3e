//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own credential checks, session bookkeeping and report
//! file access so route handlers stay focused on protocol translation.

pub mod auth;
pub mod reports;
pub mod session;
