//! Error types for the session layer.

use std::path::PathBuf;

/// Errors that can occur while reading or writing session storage.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The backing file could not be read or written.
    #[error("session storage at {path} failed: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but isn't a JSON object of strings.
    #[error("session storage at {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
