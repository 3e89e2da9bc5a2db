//! Tournament CRUD and the `/tournoi/:id` roster endpoints.

use tourney_protocol::{
    encode_form, ProtocolError, Roster, Tournament, TournamentEnvelope, TournamentForm, TournamentId,
    TournamentList, TournamentPlayer,
};
use tourney_transport::{Method, RequestBody, Transport};

use crate::{ApiClient, ApiError};

/// Tournaments and their rosters.
pub struct TournamentService<'a, T: Transport> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> TournamentService<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// `GET /tournaments`, unwrapped from the `Tournois` envelope.
    pub async fn list(&self) -> Result<Vec<Tournament>, ApiError> {
        let list: TournamentList = self.client.get("/tournaments").await?;
        Ok(list.tournaments)
    }

    /// `GET /tournaments/:id`
    ///
    /// A 2xx reply without a `tournoi` object is a protocol error.
    pub async fn get(&self, id: TournamentId) -> Result<Tournament, ApiError> {
        let envelope: TournamentEnvelope = self.client.get(&format!("/tournaments/{id}")).await?;
        envelope.tournoi.ok_or_else(|| {
            ProtocolError::InvalidMessage(format!("tournament {id} missing from response")).into()
        })
    }

    /// `POST /tournaments` (multipart).
    ///
    /// Whatever the server echoes back is ignored; a 2xx status is the
    /// only success signal.
    pub async fn create(&self, form: &TournamentForm) -> Result<(), ApiError> {
        self.client
            .execute(Method::Post, "/tournaments", encode_form(form)?)
            .await
    }

    /// `PUT /tournaments/:id` (multipart). The reply body is ignored.
    pub async fn update(&self, id: TournamentId, form: &TournamentForm) -> Result<(), ApiError> {
        self.client
            .execute(Method::Put, &format!("/tournaments/{id}"), encode_form(form)?)
            .await
    }

    /// `DELETE /tournaments/:id`
    pub async fn delete(&self, id: TournamentId) -> Result<(), ApiError> {
        self.client
            .execute(Method::Delete, &format!("/tournaments/{id}"), RequestBody::Empty)
            .await
    }

    // -----------------------------------------------------------------------
    // Roster
    // -----------------------------------------------------------------------

    /// `POST /tournoi/:id/add-player`. Registers the current user.
    pub async fn add_player(&self, id: TournamentId) -> Result<(), ApiError> {
        self.client
            .execute(Method::Post, &format!("/tournoi/{id}/add-player"), RequestBody::Empty)
            .await
    }

    /// `GET /tournoi/:id/players`
    pub async fn players(&self, id: TournamentId) -> Result<Vec<TournamentPlayer>, ApiError> {
        let roster: Roster = self.client.get(&format!("/tournoi/{id}/players")).await?;
        Ok(roster.players)
    }

    /// `DELETE /tournoi/:id/remove-player`. Unregisters the current user.
    pub async fn remove_player(&self, id: TournamentId) -> Result<(), ApiError> {
        self.client
            .execute(
                Method::Delete,
                &format!("/tournoi/{id}/remove-player"),
                RequestBody::Empty,
            )
            .await
    }
}
