//! Match list, details, and the create and edit forms.

use chrono::Utc;
use tourney_protocol::{Match, MatchForm, MatchId, Tournament, UserId};
use tourney_transport::Transport;

use crate::state::{record, render_error};
use crate::{Confirm, Route, ViewContext, ViewError, ViewState, DELETE_MATCH_PROMPT};

const LIST_FAILED: &str = "Failed to fetch matches";
const DETAILS_FAILED: &str = "Failed to fetch match details";
const TOURNAMENTS_FAILED: &str = "Failed to fetch tournaments";
const DELETE_FAILED: &str = "Failed to delete match";
const CREATE_FAILED: &str = "Failed to create match";
const UPDATE_FAILED: &str = "Failed to update match";

// ---------------------------------------------------------------------------
// List / Details
// ---------------------------------------------------------------------------

pub struct MatchListView<T: Transport> {
    ctx: ViewContext<T>,
    pub state: ViewState<Vec<Match>>,
}

impl<T: Transport> MatchListView<T> {
    pub fn new(ctx: ViewContext<T>) -> Self {
        Self {
            ctx,
            state: ViewState::loading(),
        }
    }

    pub fn matches(&self) -> &[Match] {
        self.state.data.as_deref().unwrap_or_default()
    }

    pub async fn mount(&mut self) {
        self.state.begin();
        match self.ctx.client().matches().list().await {
            Ok(list) => self.state.succeed(list),
            Err(e) => self.state.fail(&ViewError::from(e), LIST_FAILED),
        }
    }

    /// Deletes a match after confirmation, then re-fetches the list.
    pub async fn delete(&mut self, id: MatchId, confirm: &impl Confirm) -> Result<bool, ViewError> {
        if !confirm.confirm(DELETE_MATCH_PROMPT) {
            return Ok(false);
        }
        let result = self.ctx.client().matches().delete(id).await.map_err(ViewError::from);
        record(&mut self.state.error, result, DELETE_FAILED)?;
        self.mount().await;
        Ok(true)
    }
}

pub struct MatchDetailsView<T: Transport> {
    ctx: ViewContext<T>,
    id: MatchId,
    pub state: ViewState<Match>,
}

impl<T: Transport> MatchDetailsView<T> {
    pub fn new(ctx: ViewContext<T>, id: MatchId) -> Self {
        Self {
            ctx,
            id,
            state: ViewState::loading(),
        }
    }

    pub async fn mount(&mut self) {
        self.state.begin();
        match self.ctx.client().matches().get(self.id).await {
            Ok(m) => self.state.succeed(m),
            Err(e) => self.state.fail(&ViewError::from(e), DETAILS_FAILED),
        }
    }

    /// Deletes the match after confirmation and returns to the list.
    pub async fn delete(&mut self, confirm: &impl Confirm) -> Result<bool, ViewError> {
        if !confirm.confirm(DELETE_MATCH_PROMPT) {
            return Ok(false);
        }
        let result = self.ctx.client().matches().delete(self.id).await.map_err(ViewError::from);
        record(&mut self.state.error, result, DELETE_FAILED)?;
        self.ctx.navigate(Route::Matches);
        Ok(true)
    }
}

// ---------------------------------------------------------------------------
// Create / Edit
// ---------------------------------------------------------------------------

/// The new-match form. Mount loads the tournaments offered in the
/// tournament selector.
pub struct CreateMatchView<T: Transport> {
    ctx: ViewContext<T>,
    pub tournaments: ViewState<Vec<Tournament>>,
    pub form: MatchForm,
    pub error: Option<String>,
    pub saving: bool,
}

impl<T: Transport> CreateMatchView<T> {
    pub fn new(ctx: ViewContext<T>) -> Self {
        Self {
            ctx,
            tournaments: ViewState::loading(),
            form: MatchForm {
                tournoi_id: None,
                player_1_id: UserId(0),
                player_2_id: UserId(0),
                score_player_1: 0,
                score_player_2: 0,
                match_date: Utc::now().date_naive(),
            },
            error: None,
            saving: false,
        }
    }

    pub async fn mount(&mut self) {
        self.tournaments.begin();
        match self.ctx.client().tournaments().list().await {
            Ok(list) => self.tournaments.succeed(list),
            Err(e) => self.tournaments.fail_with(&ViewError::from(e), TOURNAMENTS_FAILED),
        }
    }

    pub async fn submit(&mut self) -> Result<(), ViewError> {
        self.saving = true;
        let result = self.save().await;
        self.saving = false;
        record(&mut self.error, result, CREATE_FAILED)?;
        self.ctx.navigate(Route::Matches);
        Ok(())
    }

    async fn save(&self) -> Result<(), ViewError> {
        self.form.validate().map_err(ViewError::invalid)?;
        Ok(self.ctx.client().matches().create(&self.form).await?)
    }

    pub fn cancel(&self) {
        self.ctx.navigate(Route::Matches);
    }
}

/// The edit form for an existing match.
pub struct EditMatchView<T: Transport> {
    ctx: ViewContext<T>,
    id: MatchId,
    pub form: Option<MatchForm>,
    pub tournaments: Vec<Tournament>,
    pub loading: bool,
    pub error: Option<String>,
    pub saving: bool,
}

impl<T: Transport> EditMatchView<T> {
    pub fn new(ctx: ViewContext<T>, id: MatchId) -> Self {
        Self {
            ctx,
            id,
            form: None,
            tournaments: Vec::new(),
            loading: true,
            error: None,
            saving: false,
        }
    }

    /// Fetches the match and the tournament list concurrently.
    ///
    /// Either failure sets the error line; the match failure wins when
    /// both fail.
    pub async fn mount(&mut self) {
        self.loading = true;
        self.error = None;
        let client = self.ctx.client();
        let matches = client.matches();
        let tournament_service = client.tournaments();
        let (m, tournaments) = tokio::join!(matches.get(self.id), tournament_service.list());

        match tournaments {
            Ok(list) => self.tournaments = list,
            Err(e) if e.is_unauthorized() => {}
            Err(_) => self.error = Some(TOURNAMENTS_FAILED.to_string()),
        }
        match m {
            Ok(m) => self.form = Some(MatchForm::from_match(&m)),
            Err(e) => self.error = render_error(&ViewError::from(e), DETAILS_FAILED),
        }
        self.loading = false;
    }

    pub async fn submit(&mut self) -> Result<(), ViewError> {
        self.saving = true;
        let result = self.save().await;
        self.saving = false;
        record(&mut self.error, result, UPDATE_FAILED)?;
        self.ctx.navigate(Route::MatchDetails(self.id));
        Ok(())
    }

    async fn save(&self) -> Result<(), ViewError> {
        let form = self.form.as_ref().ok_or(ViewError::NotLoaded("match"))?;
        form.validate().map_err(ViewError::invalid)?;
        Ok(self.ctx.client().matches().update(self.id, form).await?)
    }

    pub fn cancel(&self) {
        self.ctx.navigate(Route::MatchDetails(self.id));
    }
}
