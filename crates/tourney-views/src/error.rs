//! Error types for the view layer.

use tourney_client::ApiError;
use tourney_protocol::ProtocolError;
use tourney_session::SessionError;

/// Why a view action failed.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// The remote call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The form failed its own constraints; nothing was sent.
    #[error("{0}")]
    Invalid(String),

    /// The session could not be written or cleared.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The action needs data the view has not loaded.
    #[error("{0} not loaded")]
    NotLoaded(&'static str),
}

impl ViewError {
    /// Wraps a failed `validate()`.
    pub fn invalid(error: ProtocolError) -> Self {
        match error {
            ProtocolError::InvalidMessage(message) => Self::Invalid(message),
            other => Self::Invalid(other.to_string()),
        }
    }

    /// Returns `true` when the server answered 401. Such errors are
    /// handled by the session teardown and never rendered inline.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_unauthorized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_keeps_the_bare_message() {
        let err = ViewError::invalid(ProtocolError::InvalidMessage("name is required".into()));
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn test_is_unauthorized() {
        let err: ViewError = ApiError::Status {
            status: 401,
            body: Default::default(),
        }
        .into();
        assert!(err.is_unauthorized());
        assert!(!ViewError::NotLoaded("tournament").is_unauthorized());
    }
}
