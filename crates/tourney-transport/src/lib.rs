//! HTTP transport abstraction layer for Tourney.
//!
//! Provides the [`Transport`] trait that abstracts over how a request
//! reaches the remote API, and the request/response values that travel
//! through it.
//!
//! # Feature Flags
//!
//! - `http` (default): real HTTP transport via `reqwest`
//!
//! [`ScriptedTransport`] is always available: it answers from canned
//! responses and records what it was asked, for tests and offline demos.

#![allow(async_fn_in_trait)]

mod error;
#[cfg(feature = "http")]
mod http;
mod message;
mod scripted;

pub use error::TransportError;
#[cfg(feature = "http")]
pub use http::HttpTransport;
pub use message::{
    FileUpload, FormPart, Headers, HttpRequest, HttpResponse, Method, PartValue, RequestBody,
};
pub use scripted::ScriptedTransport;

/// Sends a single request and waits for its response.
///
/// A transport reports any response it receives, whatever the status;
/// classifying 4xx/5xx is the caller's job. `Err` means no response at all.
pub trait Transport: Send + Sync + 'static {
    /// Dispatches `request` and resolves with the raw response.
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, TransportError>> + Send;
}

/// Joins a request path onto a base address with exactly one `/` between
/// them, so `http://host/api/` + `/login` is `http://host/api/login`.
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        format!("{base}/")
    } else {
        format!("{base}/{path}")
    }
}
