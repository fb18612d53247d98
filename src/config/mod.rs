//! Configuration module for the Leads backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::AppError;

/// Default upstream collection endpoint.
pub const DEFAULT_SOURCE_URL: &str = "https://jsonplaceholder.typicode.com/posts";

/// Only this many upstream records are mapped and stored by default.
pub const DEFAULT_FETCH_LIMIT: usize = 20;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the upstream record collection
    pub source_url: String,
    /// Maximum number of upstream records kept per load
    pub fetch_limit: usize,
    /// Timeout for a single upstream request
    pub fetch_timeout: Duration,
    /// Seed for the demo data augmenter; random when unset
    pub demo_seed: Option<u64>,
    /// Whether to run an initial load before serving requests
    pub load_on_startup: bool,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let source_url =
            env::var("LEADS_SOURCE_URL").unwrap_or_else(|_| DEFAULT_SOURCE_URL.to_string());

        let fetch_limit = parse_var("LEADS_FETCH_LIMIT", DEFAULT_FETCH_LIMIT)?;

        let fetch_timeout = Duration::from_secs(parse_var("LEADS_FETCH_TIMEOUT_SECS", 10u64)?);

        let demo_seed = match env::var("LEADS_DEMO_SEED") {
            Ok(raw) => Some(parse_value("LEADS_DEMO_SEED", &raw)?),
            Err(_) => None,
        };

        let load_on_startup = parse_var("LEADS_LOAD_ON_STARTUP", true)?;

        let bind_addr = parse_var(
            "LEADS_BIND_ADDR",
            SocketAddr::from(([127, 0, 0, 1], 8080)),
        )?;

        let log_level = env::var("LEADS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_json = env::var("LEADS_LOG_FORMAT")
            .map(|format| format.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Ok(Self {
            source_url,
            fetch_limit,
            fetch_timeout,
            demo_seed,
            load_on_startup,
            bind_addr,
            log_level,
            log_json,
        })
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) => parse_value(name, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T: FromStr>(name: &str, raw: &str) -> Result<T, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::Validation(format!("Invalid {} value: {:?}", name, raw)))
}
