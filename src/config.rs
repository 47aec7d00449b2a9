//! Runtime Settings
//!
//! Read once at startup from environment variables, each with a default.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::time::Duration;

pub const ENV_BIND: &str = "BOOK_FINDER_BIND";
pub const ENV_SEARCH_URL: &str = "CATALOG_SEARCH_URL";
pub const ENV_COVERS_URL: &str = "CATALOG_COVERS_URL";
pub const ENV_SITE_URL: &str = "CATALOG_SITE_URL";
pub const ENV_TIMEOUT_SECS: &str = "CATALOG_TIMEOUT_SECS";
pub const ENV_SESSION_IDLE_SECS: &str = "SESSION_IDLE_SECS";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    pub search_url: String,
    pub covers_url: String,
    pub site_url: String,
    pub request_timeout: Duration,
    pub session_idle: Duration,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key lookup; missing or blank keys take their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        let url = |key: &str, default: &str| value(key, default).trim_end_matches('/').to_string();
        let secs = |key: &str, default: &str| -> Result<Duration> {
            let raw = value(key, default);
            let secs = raw
                .parse::<u64>()
                .with_context(|| format!("{} must be a whole number of seconds, got '{}'", key, raw))?;
            Ok(Duration::from_secs(secs))
        };

        let bind = value(ENV_BIND, "127.0.0.1:8080");
        let bind_addr = bind
            .parse::<SocketAddr>()
            .with_context(|| format!("{} is not a socket address: '{}'", ENV_BIND, bind))?;

        Ok(Self {
            bind_addr,
            search_url: url(ENV_SEARCH_URL, "https://openlibrary.org/search.json"),
            covers_url: url(ENV_COVERS_URL, "https://covers.openlibrary.org"),
            site_url: url(ENV_SITE_URL, "https://openlibrary.org"),
            request_timeout: secs(ENV_TIMEOUT_SECS, "10")?,
            session_idle: secs(ENV_SESSION_IDLE_SECS, "900")?,
        })
    }
}
