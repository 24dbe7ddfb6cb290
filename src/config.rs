// src/config.rs

use std::{env, fmt, net::SocketAddr, time::Duration};

use dotenvy::dotenv;

/// Upper bound on a single store round-trip unless `STORE_TIMEOUT_SECS` says otherwise.
pub const DEFAULT_STORE_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string. When absent the server runs on the in-memory store.
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub rust_log: String,
    pub store_timeout: Duration,
    pub bind_addr: SocketAddr,
}

#[derive(Debug)]
pub struct ConfigError(String);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid configuration: {}", self.0)
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty());

        let jwt_secret =
            env::var("JWT_SECRET").map_err(|_| ConfigError("JWT_SECRET must be set".into()))?;

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let store_timeout =
            Duration::from_secs(parse_var("STORE_TIMEOUT_SECS", DEFAULT_STORE_TIMEOUT_SECS)?);

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError(format!("BIND_ADDR: {}", e)))?;

        Ok(Self {
            database_url,
            jwt_secret,
            rust_log,
            store_timeout,
            bind_addr,
        })
    }

    /// Configuration for tests and tooling: in-memory store, fixed secret.
    pub fn local(jwt_secret: impl Into<String>) -> Self {
        Self {
            database_url: None,
            jwt_secret: jwt_secret.into(),
            rust_log: "error".to_string(),
            store_timeout: Duration::from_secs(DEFAULT_STORE_TIMEOUT_SECS),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        }
    }
}

fn parse_var(name: &str, default: u64) -> Result<u64, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError(format!("{} must be a non-negative integer, got {:?}", name, raw))),
        Err(_) => Ok(default),
    }
}
