//! # config — runtime configuration from environment variables

use std::time::Duration;

use anyhow::Context;

/// Everything the server needs to start, resolved once in `main`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address Axum listens on, e.g. `"0.0.0.0:3000"`.
    pub bind_addr:      String,
    /// SQLite database location, e.g. `"sqlite://portfolio.db"`.
    pub database_url:   String,
    /// Base URL of the quote API, e.g. `"https://api.binance.com"`.
    pub quote_base_url: String,
    /// Per-request timeout for quote lookups.
    pub quote_timeout:  Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let timeout_secs: u64 = std::env::var("QUOTE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .context("QUOTE_TIMEOUT_SECS must be a number")?;

        Ok(Self {
            bind_addr:      std::env::var("BIND_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            database_url:   std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://portfolio.db".to_string()),
            quote_base_url: std::env::var("QUOTE_BASE_URL")
                .unwrap_or_else(|_| "https://api.binance.com".to_string()),
            quote_timeout:  Duration::from_secs(timeout_secs),
        })
    }
}
