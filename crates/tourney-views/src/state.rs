//! Render state shared by every view, and the one place errors become text.

use crate::ViewError;

/// What a screen shows: its data, a spinner, or an error line.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> ViewState<T> {
    /// A state that starts out loading, as a screen does before mount.
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn succeed(&mut self, data: T) {
        self.data = Some(data);
        self.loading = false;
    }

    /// Records a failure, rendered with `fallback` when the server gave no
    /// text of its own.
    pub fn fail(&mut self, error: &ViewError, fallback: &str) {
        self.loading = false;
        self.error = render_error(error, fallback);
    }

    /// Records a failure with fixed text, ignoring what the server said.
    pub fn fail_with(&mut self, error: &ViewError, text: &str) {
        self.loading = false;
        self.error = (!error.is_unauthorized()).then(|| text.to_string());
    }
}

/// Turns an error into the single line a view shows.
///
/// Returns `None` for a 401: the session has already been ended and the
/// router is on its way to login.
pub fn render_error(error: &ViewError, fallback: &str) -> Option<String> {
    match error {
        ViewError::Api(e) if e.is_unauthorized() => None,
        ViewError::Api(e) => Some(e.server_message().unwrap_or(fallback).to_string()),
        ViewError::Invalid(message) => Some(message.clone()),
        ViewError::Session(_) | ViewError::NotLoaded(_) => Some(fallback.to_string()),
    }
}

/// Runs `result` through [`render_error`] into `slot`, passing it on.
pub(crate) fn record<R>(
    slot: &mut Option<String>,
    result: Result<R, ViewError>,
    fallback: &str,
) -> Result<R, ViewError> {
    *slot = match &result {
        Ok(_) => None,
        Err(e) => render_error(e, fallback),
    };
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tourney_client::ApiError;
    use tourney_protocol::ErrorBody;
    use tourney_transport::TransportError;

    fn status(code: u16, error: Option<&str>) -> ViewError {
        ApiError::Status {
            status: code,
            body: ErrorBody {
                error: error.map(String::from),
                message: None,
            },
        }
        .into()
    }

    #[test]
    fn test_server_text_beats_fallback() {
        assert_eq!(
            render_error(&status(422, Some("Tournament is full")), "Failed to join tournament"),
            Some("Tournament is full".into())
        );
        assert_eq!(
            render_error(&status(500, None), "Failed to join tournament"),
            Some("Failed to join tournament".into())
        );
    }

    #[test]
    fn test_no_response_uses_fallback() {
        let err: ViewError = ApiError::from(TransportError::NoResponse("refused".into())).into();
        assert_eq!(
            render_error(&err, "Failed to fetch matches"),
            Some("Failed to fetch matches".into())
        );
    }

    #[test]
    fn test_401_renders_nothing() {
        let mut state: ViewState<()> = ViewState::loading();
        state.fail(&status(401, Some("Unauthenticated.")), "Failed to fetch tournaments");
        assert_eq!(state.error, None);
        assert!(!state.loading);

        state.fail_with(&status(401, None), "Failed to fetch profile");
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_record_clears_on_success() {
        let mut slot = Some("old".to_string());
        let ok: Result<u8, ViewError> = Ok(1);
        assert_eq!(record(&mut slot, ok, "x").unwrap(), 1);
        assert_eq!(slot, None);
    }
}
