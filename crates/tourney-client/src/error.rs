//! Error type for the access layer.

use tourney_protocol::{ErrorBody, ProtocolError};
use tourney_transport::TransportError;

/// Why a façade call failed.
///
/// Façades return this unchanged; views turn it into a single string
/// (see [`classify`](crate::classify) and [`ApiError::server_message`]).
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No response: the request could not be sent or was never answered.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The request body could not be encoded or the response decoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The server answered with a non-2xx status.
    #[error("server responded {status}{}", detail(.body))]
    Status { status: u16, body: ErrorBody },
}

fn detail(body: &ErrorBody) -> String {
    body.text().map(|t| format!(": {t}")).unwrap_or_default()
}

impl ApiError {
    /// Returns the HTTP status, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` for 401 responses. By the time a caller sees one,
    /// the session has already been ended.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// The server's own error text, if it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } => body.text(),
            _ => None,
        }
    }
}
