//! Server configuration parsed from environment variables.
//!
//! `.env.dev` or `.env.prod` is loaded first depending on `RUST_ENV`
//! (default `development`); real environment variables win over both.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path::PathBuf;

use tracing::Level;

pub const DEFAULT_PORT: u16 = 8084;
pub const DEFAULT_REPORTS_DIR: &str = "./out";
pub const DEFAULT_STATIC_DIR: &str = "./dist";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),
    #[error("invalid VERBOSITY '{0}' (expected TRACE, DEBUG, INFO, WARN or ERROR)")]
    InvalidVerbosity(String),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Login password. `None` leaves login open.
    pub password: Option<String>,
    /// Bearer token accepted on protected routes in place of a session.
    pub api_token: Option<String>,
    /// Directory holding the pre-computed report JSON files.
    pub reports_dir: PathBuf,
    /// Front-end build served as the fallback.
    pub static_dir: PathBuf,
    pub cookie_secure: bool,
    /// Key login rate limits on `X-Forwarded-For` instead of the peer
    /// address. Only safe behind a proxy that overwrites the header.
    pub trust_forwarded_for: bool,
    pub verbosity: Level,
}

impl ServerConfig {
    /// Load dotenv files, then read the process environment.
    ///
    /// Optional:
    /// - `PORT`: default 8084
    /// - `PASSWORD`, `API_TOKEN`
    /// - `REPORTS_DIR`: default `./out`
    /// - `STATIC_DIR`: default `./dist`
    /// - `COOKIE_SECURE`: `1/true/yes/on` or `0/false/no/off`
    /// - `TRUST_FORWARDED_FOR`: same values, default off
    /// - `VERBOSITY`: default `INFO`
    pub fn from_env() -> Result<Self, ConfigError> {
        load_dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };
        let verbosity = match non_empty("VERBOSITY") {
            Some(raw) => parse_verbosity(&raw)?,
            None => Level::INFO,
        };

        Ok(Self {
            port,
            password: non_empty("PASSWORD"),
            api_token: non_empty("API_TOKEN"),
            reports_dir: non_empty("REPORTS_DIR").map_or_else(|| PathBuf::from(DEFAULT_REPORTS_DIR), PathBuf::from),
            static_dir: non_empty("STATIC_DIR").map_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR), PathBuf::from),
            cookie_secure: lookup("COOKIE_SECURE").as_deref().and_then(parse_bool).unwrap_or(false),
            trust_forwarded_for: lookup("TRUST_FORWARDED_FOR").as_deref().and_then(parse_bool).unwrap_or(false),
            verbosity,
        })
    }
}

fn load_dotenv() {
    let environment = std::env::var("RUST_ENV").unwrap_or_else(|_| "development".into());
    let _ = match environment.as_str() {
        "development" => dotenvy::from_filename(".env.dev"),
        "production" => dotenvy::from_filename(".env.prod"),
        _ => dotenvy::dotenv(),
    };
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_verbosity(raw: &str) -> Result<Level, ConfigError> {
    match raw.trim().to_ascii_uppercase().as_str() {
        "TRACE" => Ok(Level::TRACE),
        "DEBUG" => Ok(Level::DEBUG),
        "INFO" => Ok(Level::INFO),
        "WARN" => Ok(Level::WARN),
        "ERROR" => Ok(Level::ERROR),
        _ => Err(ConfigError::InvalidVerbosity(raw.to_owned())),
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
