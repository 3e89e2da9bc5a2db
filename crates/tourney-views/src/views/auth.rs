//! Login and registration screens, plus logout.

use tourney_protocol::{Credentials, Registration};
use tourney_session::EndReason;
use tourney_transport::Transport;

use crate::state::record;
use crate::{Route, ViewContext, ViewError};

const LOGIN_FAILED: &str = "An error occurred during login";
const REGISTER_FAILED: &str = "An error occurred during registration";

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// The sign-in form.
pub struct LoginView<T: Transport> {
    ctx: ViewContext<T>,
    pub credentials: Credentials,
    pub error: Option<String>,
}

impl<T: Transport> LoginView<T> {
    pub fn new(ctx: ViewContext<T>) -> Self {
        Self {
            ctx,
            credentials: Credentials::default(),
            error: None,
        }
    }

    /// Signs in, starts the session and moves on to the tournament list.
    ///
    /// The user id is taken from the login response when it carries one,
    /// otherwise from `GET /user`. If that lookup fails for any reason
    /// other than a 401, the session keeps just the token.
    pub async fn submit(&mut self) -> Result<(), ViewError> {
        let result = self.sign_in().await;
        record(&mut self.error, result, LOGIN_FAILED)
    }

    async fn sign_in(&self) -> Result<(), ViewError> {
        self.credentials.validate().map_err(ViewError::invalid)?;

        let response = self.ctx.client().auth().login(&self.credentials).await?;
        let session = self.ctx.session();
        session.start(&response.token, response.user_id())?;

        if session.user_id().is_none() {
            match self.ctx.client().auth().profile().await {
                Ok(user) => session.set_user_id(user.id)?,
                Err(e) if e.is_unauthorized() => return Err(e.into()),
                Err(e) => tracing::warn!(error = %e, "could not resolve user id after login"),
            }
        }

        self.ctx.navigate(Route::Tournaments);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Register
// ---------------------------------------------------------------------------

/// The sign-up form.
pub struct RegisterView<T: Transport> {
    ctx: ViewContext<T>,
    pub registration: Registration,
    pub error: Option<String>,
}

impl<T: Transport> RegisterView<T> {
    pub fn new(ctx: ViewContext<T>) -> Self {
        Self {
            ctx,
            registration: Registration::default(),
            error: None,
        }
    }

    /// Creates the account and sends the user to login.
    pub async fn submit(&mut self) -> Result<(), ViewError> {
        let result = self.sign_up().await;
        record(&mut self.error, result, REGISTER_FAILED)
    }

    async fn sign_up(&self) -> Result<(), ViewError> {
        self.registration.validate().map_err(ViewError::invalid)?;
        self.ctx.client().auth().register(&self.registration).await?;
        self.ctx.navigate(Route::Login);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Logout
// ---------------------------------------------------------------------------

/// Revokes the token, ends the session and shows the login screen.
///
/// A failed `POST /logout` is logged and otherwise ignored: the local
/// session ends either way.
pub async fn logout<T: Transport>(ctx: &ViewContext<T>) -> Result<(), ViewError> {
    if let Err(e) = ctx.client().auth().logout().await {
        tracing::warn!(error = %e, "server-side logout failed");
    }
    ctx.session().end(EndReason::Logout)?;
    ctx.navigate(Route::Login);
    Ok(())
}
