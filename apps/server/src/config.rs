use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use fiifolio_market_data::provider::brapi::DEFAULT_BASE_URL;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub brapi_base_url: String,
    pub brapi_token: Option<String>,
    /// `None` disables the background quote refresh.
    pub quote_refresh_interval: Option<Duration>,
    pub quote_max_concurrency: usize,
    pub log_format: String,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_number<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let raw_addr = env_or("FII_LISTEN_ADDR", "0.0.0.0:8080");
        let listen_addr: SocketAddr = raw_addr
            .parse()
            .with_context(|| format!("Invalid FII_LISTEN_ADDR '{}'", raw_addr))?;
        let db_path = env_or("FII_DB_PATH", "./db/fiifolio.db");
        let cors_allow = env_or("FII_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = env_number("FII_REQUEST_TIMEOUT_MS", 30_000);
        let brapi_base_url = env_or("FII_BRAPI_BASE_URL", DEFAULT_BASE_URL);
        let brapi_token = std::env::var("BRAPI_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());
        let refresh_secs: u64 = env_number("FII_QUOTE_REFRESH_INTERVAL_SECS", 0);
        let quote_max_concurrency: usize = env_number("FII_QUOTE_MAX_CONCURRENCY", 1);
        let log_format = env_or("FII_LOG_FORMAT", "text");

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            brapi_base_url,
            brapi_token,
            quote_refresh_interval: (refresh_secs > 0).then(|| Duration::from_secs(refresh_secs)),
            quote_max_concurrency: quote_max_concurrency.max(1),
            log_format,
        })
    }
}
