//! Failure classification: any [`ApiError`] reduced to a status and one
//! human-readable message.

use tourney_protocol::ProtocolError;
use tourney_transport::TransportError;

use crate::ApiError;

pub const FALLBACK_MESSAGE: &str = "An error occurred";
pub const NO_RESPONSE_MESSAGE: &str = "No response from server";
pub const SETUP_MESSAGE: &str = "Error setting up request";

/// A classified failure. `status` is 0 when the server never answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    pub status: u16,
    pub message: String,
}

/// Classifies a failed call.
///
/// | Failure | status | message |
/// |---|---|---|
/// | server answered | its status | `error` field, else `message`, else a generic fallback |
/// | sent, no response | 0 | "No response from server" |
/// | could not be set up | 0 | "Error setting up request" |
///
/// A response that arrived but could not be decoded counts as "no
/// response": nothing usable came back.
pub fn classify(error: &ApiError) -> ApiFailure {
    match error {
        ApiError::Status { status, body } => ApiFailure {
            status: *status,
            message: body.text().unwrap_or(FALLBACK_MESSAGE).to_string(),
        },
        ApiError::Transport(TransportError::NoResponse(_))
        | ApiError::Protocol(ProtocolError::Decode(_)) => ApiFailure {
            status: 0,
            message: NO_RESPONSE_MESSAGE.to_string(),
        },
        ApiError::Transport(TransportError::InvalidRequest(_))
        | ApiError::Protocol(ProtocolError::Encode(_) | ProtocolError::InvalidMessage(_)) => {
            ApiFailure {
                status: 0,
                message: SETUP_MESSAGE.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tourney_protocol::ErrorBody;

    fn status(code: u16, body: &[u8]) -> ApiError {
        ApiError::Status {
            status: code,
            body: ErrorBody::from_bytes(body),
        }
    }

    #[test]
    fn test_error_field_wins() {
        let failure = classify(&status(422, br#"{"error":"X","message":"Y"}"#));
        assert_eq!(
            failure,
            ApiFailure {
                status: 422,
                message: "X".into()
            }
        );
    }

    #[test]
    fn test_message_field_then_fallback() {
        assert_eq!(classify(&status(400, br#"{"message":"Y"}"#)).message, "Y");
        assert_eq!(classify(&status(500, b"")).message, FALLBACK_MESSAGE);
    }

    #[test]
    fn test_no_response_is_status_zero() {
        let failure = classify(&ApiError::Transport(TransportError::NoResponse(
            "connection refused".into(),
        )));
        assert_eq!(failure.status, 0);
        assert_eq!(failure.message, NO_RESPONSE_MESSAGE);
    }

    #[test]
    fn test_setup_failures() {
        let failure = classify(&ApiError::Transport(TransportError::InvalidRequest(
            "bad header".into(),
        )));
        assert_eq!(failure.status, 0);
        assert_eq!(failure.message, SETUP_MESSAGE);

        let failure = classify(&ApiError::Protocol(ProtocolError::InvalidMessage(
            "name is required".into(),
        )));
        assert_eq!(failure.message, SETUP_MESSAGE);
    }
}
