//! Client configuration.
//!
//! Built from defaults, then the environment, then command-line overrides.
//!
//! # Example
//!
//! ```ignore
//! use tally::config::ClientConfig;
//!
//! let config = ClientConfig::from_env()
//!     .with_base_url("http://localhost:8000")
//!     .with_request_timeout(Duration::from_secs(30));
//! ```

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::client::DEFAULT_BASE_URL;

/// Backend URL override.
pub const ENV_API_URL: &str = "TALLY_API_URL";
/// Request timeout in whole seconds.
pub const ENV_TIMEOUT_SECS: &str = "TALLY_TIMEOUT_SECS";
/// `EnvFilter` directive for the log file.
pub const ENV_LOG: &str = "TALLY_LOG";
/// Directory holding `tally.log`.
pub const ENV_LOG_DIR: &str = "TALLY_LOG_DIR";

/// The backend gives the agent 60 seconds per turn.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the agent backend, without trailing slash
    pub base_url: String,
    /// Per-request timeout applied by the HTTP client
    pub request_timeout: Duration,
    /// Filter directive for the tracing subscriber
    pub log_filter: String,
    /// Where the log file goes; `None` disables file logging
    pub log_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_dir: default_log_dir(),
        }
    }
}

fn default_log_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("tally"))
}

fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend base URL.
    pub fn with_base_url(mut self, url: impl AsRef<str>) -> Self {
        self.base_url = normalize_url(url.as_ref());
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    pub fn with_log_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.log_dir = dir;
        self
    }

    /// Defaults overridden by `TALLY_*` environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(ENV_API_URL) {
            if !url.trim().is_empty() {
                config = config.with_base_url(url);
            }
        }

        if let Ok(raw) = std::env::var(ENV_TIMEOUT_SECS) {
            match parse_timeout(&raw) {
                Some(timeout) => config.request_timeout = timeout,
                None => warn!(
                    "Ignoring {}={:?}, using {}s",
                    ENV_TIMEOUT_SECS, raw, DEFAULT_TIMEOUT_SECS
                ),
            }
        }

        if let Ok(filter) = std::env::var(ENV_LOG) {
            if !filter.trim().is_empty() {
                config.log_filter = filter;
            }
        }

        if let Ok(dir) = std::env::var(ENV_LOG_DIR) {
            if !dir.trim().is_empty() {
                config.log_dir = Some(PathBuf::from(dir));
            }
        }

        config
    }
}

/// Whole, positive seconds only.
fn parse_timeout(raw: &str) -> Option<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(secs) => Some(Duration::from_secs(secs)),
    }
}
