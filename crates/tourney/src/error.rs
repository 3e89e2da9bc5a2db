//! Unified error type for Tourney.

use tourney_client::ApiError;
use tourney_protocol::ProtocolError;
use tourney_session::SessionError;
use tourney_transport::TransportError;
use tourney_views::ViewError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `tourney` meta-crate, you deal with this single
/// error type instead of importing errors from each sub-crate.
#[derive(Debug, thiserror::Error)]
pub enum TourneyError {
    /// A transport-level error (no response, bad request).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode, invalid form).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A session-level error (storage unreadable or unwritable).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A failed remote call.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A failed view action.
    #[error(transparent)]
    View(#[from] ViewError),

    /// A configuration value could not be used.
    #[error("invalid configuration: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_transport_error() {
        let err = TransportError::NoResponse("gone".into());
        let tourney_err: TourneyError = err.into();
        assert!(matches!(tourney_err, TourneyError::Transport(_)));
        assert!(tourney_err.to_string().contains("gone"));
    }

    #[test]
    fn test_from_protocol_error() {
        let err = ProtocolError::InvalidMessage("bad".into());
        let tourney_err: TourneyError = err.into();
        assert!(matches!(tourney_err, TourneyError::Protocol(_)));
    }

    #[test]
    fn test_from_api_error() {
        let err = ApiError::Status {
            status: 500,
            body: Default::default(),
        };
        let tourney_err: TourneyError = err.into();
        assert!(matches!(tourney_err, TourneyError::Api(_)));
    }

    #[test]
    fn test_from_view_error() {
        let err = ViewError::NotLoaded("match");
        let tourney_err: TourneyError = err.into();
        assert!(matches!(tourney_err, TourneyError::View(_)));
        assert_eq!(tourney_err.to_string(), "match not loaded");
    }

    #[test]
    fn test_config_display() {
        let err = TourneyError::Config("TOURNEY_TIMEOUT_SECS: not a number".into());
        assert_eq!(
            err.to_string(),
            "invalid configuration: TOURNEY_TIMEOUT_SECS: not a number"
        );
    }
}
