//! HTTP client configuration parsing from environment variables.

use std::env;

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub max_retries: u32,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 10,
            max_retries: 3,
            user_agent: concat!("trendcast/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
            connect_timeout_secs: env::var("HTTP_CONNECT_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.connect_timeout_secs),
            max_retries: env::var("HTTP_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_retries),
            user_agent: env::var("HTTP_USER_AGENT").unwrap_or(defaults.user_agent),
        }
    }
}
