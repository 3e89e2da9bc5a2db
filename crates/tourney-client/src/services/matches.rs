//! Match CRUD under `/matches`. Bodies are always JSON.

use tourney_protocol::{
    encode_form, Match, MatchEnvelope, MatchForm, MatchId, MatchList, ProtocolError,
};
use tourney_transport::{Method, RequestBody, Transport};

use crate::{ApiClient, ApiError};

/// Matches between two players of a tournament.
pub struct MatchService<'a, T: Transport> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> MatchService<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// `GET /matches`
    pub async fn list(&self) -> Result<Vec<Match>, ApiError> {
        let list: MatchList = self.client.get("/matches").await?;
        Ok(list.matches)
    }

    /// `GET /matches/:id`
    pub async fn get(&self, id: MatchId) -> Result<Match, ApiError> {
        let envelope: MatchEnvelope = self.client.get(&format!("/matches/{id}")).await?;
        envelope.matche.ok_or_else(|| {
            ProtocolError::InvalidMessage(format!("match {id} missing from response")).into()
        })
    }

    /// `POST /matches` (JSON).
    pub async fn create(&self, form: &MatchForm) -> Result<(), ApiError> {
        self.client
            .execute(Method::Post, "/matches", encode_form(form)?)
            .await
    }

    /// `PUT /matches/:id` (JSON).
    pub async fn update(&self, id: MatchId, form: &MatchForm) -> Result<(), ApiError> {
        self.client
            .execute(Method::Put, &format!("/matches/{id}"), encode_form(form)?)
            .await
    }

    /// `DELETE /matches/:id`
    pub async fn delete(&self, id: MatchId) -> Result<(), ApiError> {
        self.client
            .execute(Method::Delete, &format!("/matches/{id}"), RequestBody::Empty)
            .await
    }
}
