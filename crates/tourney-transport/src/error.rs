/// Errors that can occur in the transport layer.
///
/// The two variants mirror the two ways a request can fail before any
/// HTTP status is known: the request never left (or could not be built),
/// or it left and nothing usable came back.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request was sent but no response was received
    /// (connection refused, timeout, reset mid-body).
    #[error("no response: {0}")]
    NoResponse(String),

    /// The request could not be built (bad URL, bad header value,
    /// unreadable file part).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl TransportError {
    /// Returns `true` if the request was dispatched but never answered.
    pub fn is_no_response(&self) -> bool {
        matches!(self, Self::NoResponse(_))
    }
}
