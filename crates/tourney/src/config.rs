//! Application configuration, read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use tourney_client::{ClientConfig, DEFAULT_BASE_URL};

use crate::TourneyError;

pub const API_URL_VAR: &str = "TOURNEY_API_URL";
pub const SESSION_FILE_VAR: &str = "TOURNEY_SESSION_FILE";
pub const TIMEOUT_VAR: &str = "TOURNEY_TIMEOUT_SECS";
pub const LOG_VAR: &str = "TOURNEY_LOG";

/// Configuration for an [`App`](crate::App).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base address of the API.
    ///
    /// Default: `http://127.0.0.1:8000/api/`.
    pub api_url: String,

    /// Where the session is persisted. `None` keeps it in memory, so it
    /// is gone when the process exits.
    ///
    /// Default: `None`.
    pub session_file: Option<PathBuf>,

    /// Per-request timeout.
    ///
    /// Default: 30 seconds.
    pub timeout: Duration,

    /// Log filter used when `RUST_LOG` is not set.
    ///
    /// Default: `info`.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.to_string(),
            session_file: None,
            timeout: Duration::from_secs(30),
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Reads `TOURNEY_API_URL`, `TOURNEY_SESSION_FILE`,
    /// `TOURNEY_TIMEOUT_SECS` and `TOURNEY_LOG`. Unset or empty variables
    /// keep their defaults.
    pub fn from_env() -> Result<Self, TourneyError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading from `lookup` instead.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, TourneyError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get(API_URL_VAR) {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(TourneyError::Config(format!(
                    "{API_URL_VAR}: expected an http(s) URL, got {url:?}"
                )));
            }
            config.api_url = url;
        }
        if let Some(path) = get(SESSION_FILE_VAR) {
            config.session_file = Some(PathBuf::from(path));
        }
        if let Some(secs) = get(TIMEOUT_VAR) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                TourneyError::Config(format!("{TIMEOUT_VAR}: expected whole seconds, got {secs:?}"))
            })?;
            if secs == 0 {
                return Err(TourneyError::Config(format!("{TIMEOUT_VAR}: must be at least 1")));
            }
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(filter) = get(LOG_VAR) {
            config.log_filter = filter;
        }
        Ok(config)
    }

    /// The access-layer part of this configuration.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api_url.clone(),
            timeout: self.timeout,
            ..ClientConfig::default()
        }
    }
}
