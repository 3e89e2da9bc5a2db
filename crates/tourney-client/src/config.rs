//! Access-layer configuration.

use std::time::Duration;

use tourney_transport::Headers;

/// Where the API lives when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/";

/// Configuration for [`ApiClient`](crate::ApiClient).
///
/// Sensible defaults are provided; override just the fields you care
/// about with struct update syntax.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base address every request path is joined onto.
    pub base_url: String,

    /// Per-request timeout for the HTTP transport.
    ///
    /// Default: 30 seconds.
    pub timeout: Duration,

    /// Headers sent with every request before interceptors run.
    ///
    /// Default: `Accept` and `Content-Type` both `application/json`.
    pub default_headers: Headers,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            default_headers: [
                ("Accept", "application/json"),
                ("Content-Type", "application/json"),
            ]
            .into_iter()
            .collect(),
        }
    }
}
