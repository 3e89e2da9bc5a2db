//! Tournament roster: who joined, and joining or leaving.

use tourney_protocol::{TournamentId, TournamentPlayer};
use tourney_transport::Transport;

use crate::state::record;
use crate::{Confirm, ViewContext, ViewError, ViewState, LEAVE_TOURNAMENT_PROMPT};

const FETCH_FAILED: &str = "Failed to fetch players";
const JOIN_FAILED: &str = "Failed to join tournament";
const LEAVE_FAILED: &str = "Failed to leave tournament";

/// The players registered to one tournament, with join and leave.
pub struct RosterView<T: Transport> {
    ctx: ViewContext<T>,
    tournament: TournamentId,
    pub state: ViewState<Vec<TournamentPlayer>>,
}

impl<T: Transport> RosterView<T> {
    pub fn new(ctx: ViewContext<T>, tournament: TournamentId) -> Self {
        Self {
            ctx,
            tournament,
            state: ViewState::loading(),
        }
    }

    pub fn players(&self) -> &[TournamentPlayer] {
        self.state.data.as_deref().unwrap_or_default()
    }

    pub async fn mount(&mut self) {
        self.state.begin();
        match self.ctx.client().tournaments().players(self.tournament).await {
            Ok(players) => self.state.succeed(players),
            Err(e) => self.state.fail(&ViewError::from(e), FETCH_FAILED),
        }
    }

    /// Registers the current user, then re-fetches the roster.
    pub async fn join(&mut self) -> Result<(), ViewError> {
        let result = self
            .ctx
            .client()
            .tournaments()
            .add_player(self.tournament)
            .await
            .map_err(ViewError::from);
        record(&mut self.state.error, result, JOIN_FAILED)?;
        self.mount().await;
        Ok(())
    }

    /// Unregisters the current user after confirmation, then re-fetches.
    ///
    /// Returns `Ok(false)` without sending anything when the user declines.
    pub async fn leave(&mut self, confirm: &impl Confirm) -> Result<bool, ViewError> {
        if !confirm.confirm(LEAVE_TOURNAMENT_PROMPT) {
            return Ok(false);
        }
        let result = self
            .ctx
            .client()
            .tournaments()
            .remove_player(self.tournament)
            .await
            .map_err(ViewError::from);
        record(&mut self.state.error, result, LEAVE_FAILED)?;
        self.mount().await;
        Ok(true)
    }

    /// Whether the current user is on the roster.
    pub fn is_member(&self) -> bool {
        self.players().iter().any(|p| self.is_you(p))
    }

    /// Whether `player` is the current user, for the "(You)" marker.
    pub fn is_you(&self, player: &TournamentPlayer) -> bool {
        self.ctx.session().is_current_user(player.player_id)
    }
}
