//! Typed request DTOs, one per write endpoint.
//!
//! Each implements [`FormPayload`], which fixes its wire encoding, and
//! carries a `validate()` holding the same constraints the input form
//! would enforce (`required`, `min`). Nothing beyond that is checked
//! client-side; the server is the authority.

use chrono::NaiveDate;
use tourney_transport::FileUpload;

use crate::form::{FieldSpec, FieldValue, FormPayload};
use crate::{ProtocolError, TournamentId, UserId};

fn required(name: &str, value: &str) -> Result<(), ProtocolError> {
    if value.trim().is_empty() {
        return Err(ProtocolError::InvalidMessage(format!("{name} is required")));
    }
    Ok(())
}

fn text(value: &str) -> FieldValue {
    FieldValue::Text(value.to_string())
}

fn integer(value: u64) -> FieldValue {
    // Ids and counts are far below i64::MAX; saturate rather than wrap.
    FieldValue::Integer(i64::try_from(value).unwrap_or(i64::MAX))
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

/// `POST /login`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ProtocolError> {
        required("email", &self.email)?;
        required("password", &self.password)
    }
}

impl FormPayload for Credentials {
    const FIELDS: &'static [FieldSpec] = &[FieldSpec::scalar("email"), FieldSpec::scalar("password")];

    fn values(&self) -> Vec<(&'static str, FieldValue)> {
        vec![("email", text(&self.email)), ("password", text(&self.password))]
    }
}

/// `POST /register`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

impl Registration {
    pub fn validate(&self) -> Result<(), ProtocolError> {
        required("name", &self.name)?;
        required("email", &self.email)?;
        required("password", &self.password)?;
        required("password confirmation", &self.password_confirmation)
    }
}

impl FormPayload for Registration {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::scalar("name"),
        FieldSpec::scalar("email"),
        FieldSpec::scalar("password"),
        FieldSpec::scalar("password_confirmation"),
    ];

    fn values(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("name", text(&self.name)),
            ("email", text(&self.email)),
            ("password", text(&self.password)),
            ("password_confirmation", text(&self.password_confirmation)),
        ]
    }
}

/// `PUT /user`. Multipart, since it may carry a new profile image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    pub image: Option<FileUpload>,
}

impl ProfileUpdate {
    pub fn validate(&self) -> Result<(), ProtocolError> {
        required("name", &self.name)?;
        required("email", &self.email)
    }
}

impl FormPayload for ProfileUpdate {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::scalar("name"),
        FieldSpec::scalar("email"),
        FieldSpec::file("image"),
    ];

    fn values(&self) -> Vec<(&'static str, FieldValue)> {
        let mut values = vec![("name", text(&self.name)), ("email", text(&self.email))];
        if let Some(image) = &self.image {
            values.push(("image", FieldValue::File(image.clone())));
        }
        values
    }
}

// ---------------------------------------------------------------------------
// Tournaments
// ---------------------------------------------------------------------------

/// `POST /tournaments` and `PUT /tournaments/:id`.
///
/// `image` is only sent when a new file was picked; leaving it `None` on
/// update keeps the stored image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TournamentForm {
    pub name: String,
    pub rules: String,
    pub nb_players: u32,
    pub image: Option<FileUpload>,
}

impl TournamentForm {
    pub fn validate(&self) -> Result<(), ProtocolError> {
        required("name", &self.name)?;
        required("rules", &self.rules)?;
        if self.nb_players < 1 {
            return Err(ProtocolError::InvalidMessage(
                "number of players must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl FormPayload for TournamentForm {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::scalar("name"),
        FieldSpec::scalar("rules"),
        FieldSpec::scalar("nb_players"),
        FieldSpec::file("image"),
    ];

    fn values(&self) -> Vec<(&'static str, FieldValue)> {
        let mut values = vec![
            ("name", text(&self.name)),
            ("rules", text(&self.rules)),
            ("nb_players", integer(u64::from(self.nb_players))),
        ];
        if let Some(image) = &self.image {
            values.push(("image", FieldValue::File(image.clone())));
        }
        values
    }
}

// ---------------------------------------------------------------------------
// Matches
// ---------------------------------------------------------------------------

/// `POST /matches` and `PUT /matches/:id`. Always JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchForm {
    pub tournoi_id: Option<TournamentId>,
    pub player_1_id: UserId,
    pub player_2_id: UserId,
    pub score_player_1: u32,
    pub score_player_2: u32,
    pub match_date: NaiveDate,
}

impl MatchForm {
    /// Prefills a form from a fetched match, for editing.
    pub fn from_match(m: &crate::Match) -> Self {
        Self {
            tournoi_id: Some(m.tournoi_id),
            player_1_id: m.player_1_id,
            player_2_id: m.player_2_id,
            score_player_1: m.score_player_1,
            score_player_2: m.score_player_2,
            match_date: m.match_date,
        }
    }

    pub fn validate(&self) -> Result<(), ProtocolError> {
        if self.tournoi_id.is_none() {
            return Err(ProtocolError::InvalidMessage("tournament is required".into()));
        }
        Ok(())
    }
}

impl FormPayload for MatchForm {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::scalar("tournoi_id"),
        FieldSpec::scalar("player_1_id"),
        FieldSpec::scalar("player_2_id"),
        FieldSpec::scalar("score_player_1"),
        FieldSpec::scalar("score_player_2"),
        FieldSpec::scalar("match_date"),
    ];

    fn values(&self) -> Vec<(&'static str, FieldValue)> {
        let mut values = Vec::with_capacity(6);
        if let Some(id) = self.tournoi_id {
            values.push(("tournoi_id", integer(id.0)));
        }
        values.extend([
            ("player_1_id", integer(self.player_1_id.0)),
            ("player_2_id", integer(self.player_2_id.0)),
            ("score_player_1", integer(u64::from(self.score_player_1))),
            ("score_player_2", integer(u64::from(self.score_player_2))),
            (
                "match_date",
                FieldValue::Text(self.match_date.format("%Y-%m-%d").to_string()),
            ),
        ]);
        values
    }
}
