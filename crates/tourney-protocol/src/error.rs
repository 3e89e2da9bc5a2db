//! Error types for the protocol layer.
//!
//! Each crate in Tourney defines its own error enum. When you see a
//! `ProtocolError`, you know the problem is in turning typed values into
//! request bodies or response bytes into typed values, not in networking
//! or in what the server decided.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust value into a request body).
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning a response body into a Rust value).
    ///
    /// Common causes: the server changed a field name, sent a string where
    /// a number was expected, or returned an HTML error page.
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// A payload broke its own declared shape, or a form failed the
    /// constraints it carries (`required`, `min`).
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
