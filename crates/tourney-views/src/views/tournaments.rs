//! Tournament list, details, and the create and edit forms.

use tourney_protocol::{Tournament, TournamentForm, TournamentId};
use tourney_transport::Transport;

use crate::state::record;
use crate::views::RosterView;
use crate::{Confirm, Route, ViewContext, ViewError, ViewState, DELETE_TOURNAMENT_PROMPT};

const LIST_FAILED: &str = "Failed to fetch tournaments";
const DETAILS_FAILED: &str = "Failed to fetch tournament details";
const DELETE_FAILED: &str = "Failed to delete tournament";
const CREATE_FAILED: &str = "Failed to create tournament";
const UPDATE_FAILED: &str = "Failed to update tournament";

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// All tournaments. Edit and delete are offered on the ones the current
/// user created.
pub struct TournamentListView<T: Transport> {
    ctx: ViewContext<T>,
    pub state: ViewState<Vec<Tournament>>,
}

impl<T: Transport> TournamentListView<T> {
    pub fn new(ctx: ViewContext<T>) -> Self {
        Self {
            ctx,
            state: ViewState::loading(),
        }
    }

    pub fn tournaments(&self) -> &[Tournament] {
        self.state.data.as_deref().unwrap_or_default()
    }

    pub async fn mount(&mut self) {
        self.state.begin();
        match self.ctx.client().tournaments().list().await {
            Ok(list) => self.state.succeed(list),
            Err(e) => self.state.fail(&ViewError::from(e), LIST_FAILED),
        }
    }

    /// Deletes a tournament after confirmation, then re-fetches the list.
    ///
    /// Returns `Ok(false)` without sending anything when the user declines.
    pub async fn delete(&mut self, id: TournamentId, confirm: &impl Confirm) -> Result<bool, ViewError> {
        if !confirm.confirm(DELETE_TOURNAMENT_PROMPT) {
            return Ok(false);
        }
        let result = self.ctx.client().tournaments().delete(id).await.map_err(ViewError::from);
        record(&mut self.state.error, result, DELETE_FAILED)?;
        self.mount().await;
        Ok(true)
    }

    pub fn can_manage(&self, tournament: &Tournament) -> bool {
        self.ctx.session().is_current_user(tournament.creator_id)
    }
}

// ---------------------------------------------------------------------------
// Details
// ---------------------------------------------------------------------------

/// One tournament with its roster underneath.
pub struct TournamentDetailsView<T: Transport> {
    ctx: ViewContext<T>,
    id: TournamentId,
    pub state: ViewState<Tournament>,
    pub roster: RosterView<T>,
}

impl<T: Transport> TournamentDetailsView<T> {
    pub fn new(ctx: ViewContext<T>, id: TournamentId) -> Self {
        Self {
            roster: RosterView::new(ctx.clone(), id),
            ctx,
            id,
            state: ViewState::loading(),
        }
    }

    /// Fetches the tournament and its roster side by side.
    pub async fn mount(&mut self) {
        self.state.begin();
        let tournaments = self.ctx.client().tournaments();
        let (tournament, ()) = tokio::join!(tournaments.get(self.id), self.roster.mount());
        match tournament {
            Ok(tournament) => self.state.succeed(tournament),
            Err(e) => self.state.fail(&ViewError::from(e), DETAILS_FAILED),
        }
    }

    /// Deletes the tournament after confirmation and returns to the list.
    pub async fn delete(&mut self, confirm: &impl Confirm) -> Result<bool, ViewError> {
        if !confirm.confirm(DELETE_TOURNAMENT_PROMPT) {
            return Ok(false);
        }
        let result = self.ctx.client().tournaments().delete(self.id).await.map_err(ViewError::from);
        record(&mut self.state.error, result, DELETE_FAILED)?;
        self.ctx.navigate(Route::Tournaments);
        Ok(true)
    }

    /// Whether the current user created this tournament.
    pub fn is_owner(&self) -> bool {
        self.state
            .data
            .as_ref()
            .is_some_and(|t| self.ctx.session().is_current_user(t.creator_id))
    }

    /// "You" for the current user, "User N" for anyone else.
    pub fn created_by_label(&self) -> Option<String> {
        let tournament = self.state.data.as_ref()?;
        Some(if self.is_owner() {
            "You".to_string()
        } else {
            format!("User {}", tournament.creator_id)
        })
    }
}

// ---------------------------------------------------------------------------
// Create / Edit
// ---------------------------------------------------------------------------

/// The new-tournament form.
pub struct CreateTournamentView<T: Transport> {
    ctx: ViewContext<T>,
    pub form: TournamentForm,
    pub error: Option<String>,
    pub saving: bool,
}

impl<T: Transport> CreateTournamentView<T> {
    pub fn new(ctx: ViewContext<T>) -> Self {
        Self {
            ctx,
            form: TournamentForm::default(),
            error: None,
            saving: false,
        }
    }

    pub async fn submit(&mut self) -> Result<(), ViewError> {
        self.saving = true;
        let result = self.save().await;
        self.saving = false;
        record(&mut self.error, result, CREATE_FAILED)?;
        self.ctx.navigate(Route::Tournaments);
        Ok(())
    }

    async fn save(&self) -> Result<(), ViewError> {
        self.form.validate().map_err(ViewError::invalid)?;
        self.ctx.client().tournaments().create(&self.form).await?;
        Ok(())
    }

    pub fn cancel(&self) {
        self.ctx.navigate(Route::Tournaments);
    }
}

/// The edit form for an existing tournament.
///
/// The stored image is kept unless a new file is picked into
/// `form.image`.
pub struct EditTournamentView<T: Transport> {
    ctx: ViewContext<T>,
    id: TournamentId,
    pub form: TournamentForm,
    pub loading: bool,
    pub error: Option<String>,
    pub saving: bool,
}

impl<T: Transport> EditTournamentView<T> {
    pub fn new(ctx: ViewContext<T>, id: TournamentId) -> Self {
        Self {
            ctx,
            id,
            form: TournamentForm::default(),
            loading: true,
            error: None,
            saving: false,
        }
    }

    /// Fetches the tournament and fills the form from it.
    pub async fn mount(&mut self) {
        self.loading = true;
        let result = self.ctx.client().tournaments().get(self.id).await.map_err(ViewError::from);
        if let Ok(tournament) = record(&mut self.error, result, DETAILS_FAILED) {
            self.form = TournamentForm {
                name: tournament.name,
                rules: tournament.rules,
                nb_players: tournament.nb_players,
                image: None,
            };
        }
        self.loading = false;
    }

    pub async fn submit(&mut self) -> Result<(), ViewError> {
        self.saving = true;
        let result = self.save().await;
        self.saving = false;
        record(&mut self.error, result, UPDATE_FAILED)?;
        self.ctx.navigate(Route::TournamentDetails(self.id));
        Ok(())
    }

    async fn save(&self) -> Result<(), ViewError> {
        self.form.validate().map_err(ViewError::invalid)?;
        self.ctx.client().tournaments().update(self.id, &self.form).await?;
        Ok(())
    }

    pub fn cancel(&self) {
        self.ctx.navigate(Route::TournamentDetails(self.id));
    }
}
