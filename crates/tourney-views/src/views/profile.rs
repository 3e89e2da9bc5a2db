//! The signed-in user's profile screen.

use tourney_protocol::{ProfileUpdate, User};
use tourney_transport::Transport;

use crate::state::record;
use crate::{ViewContext, ViewError, ViewState};

const FETCH_FAILED: &str = "Failed to fetch profile";
const UPDATE_FAILED: &str = "Failed to update profile";
pub const PROFILE_UPDATED: &str = "Profile updated successfully";

/// The signed-in user's profile, with an edit form.
pub struct ProfileView<T: Transport> {
    ctx: ViewContext<T>,
    pub state: ViewState<User>,
    pub form: ProfileUpdate,
    pub success: Option<String>,
    pub saving: bool,
}

impl<T: Transport> ProfileView<T> {
    pub fn new(ctx: ViewContext<T>) -> Self {
        Self {
            ctx,
            state: ViewState::loading(),
            form: ProfileUpdate::default(),
            success: None,
            saving: false,
        }
    }

    /// Fetches the profile and fills the form from it.
    pub async fn mount(&mut self) {
        self.state.begin();
        match self.ctx.client().auth().profile().await {
            Ok(user) => {
                self.form = ProfileUpdate {
                    name: user.name.clone(),
                    email: user.email.clone(),
                    image: None,
                };
                self.state.succeed(user);
            }
            Err(e) => self.state.fail_with(&ViewError::from(e), FETCH_FAILED),
        }
    }

    /// Saves the form. On success the shown user is replaced with the
    /// server's copy and a success line is set.
    pub async fn submit(&mut self) -> Result<(), ViewError> {
        self.success = None;
        self.saving = true;
        let result = self.save().await;
        self.saving = false;

        let user = record(&mut self.state.error, result, UPDATE_FAILED)?;
        self.state.succeed(user);
        self.form.image = None;
        self.success = Some(PROFILE_UPDATED.to_string());
        Ok(())
    }

    async fn save(&self) -> Result<User, ViewError> {
        self.form.validate().map_err(ViewError::invalid)?;
        Ok(self.ctx.client().auth().update_profile(&self.form).await?)
    }
}
