//! Transport DTOs: the shapes the remote API sends back.
//!
//! None of these are owned domain objects. A view holds one as a snapshot
//! of what the server said at fetch time and drops it on navigation.
//!
//! Field names follow the API exactly (`tournoi_id`, `nb_players`, the
//! `Tournois` list key), so most types derive serde with no renames.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A user (player) identifier.
///
/// Newtype wrapper around the API's integer id. `#[serde(transparent)]`
/// keeps it a bare number on the wire: `UserId(7)` is just `7` in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A tournament identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TournamentId(pub u64);

impl fmt::Display for TournamentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A match identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub u64);

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// A tournament as the API reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    /// Free text.
    #[serde(default)]
    pub rules: String,
    pub nb_players: u32,
    /// Public URL of the uploaded image.
    #[serde(default)]
    pub image: Option<String>,
    pub creator_id: UserId,
    #[serde(default, with = "lenient_time::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "lenient_time::timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A match between two players of one tournament.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub tournoi_id: TournamentId,
    pub player_1_id: UserId,
    pub player_2_id: UserId,
    #[serde(default)]
    pub score_player_1: u32,
    #[serde(default)]
    pub score_player_2: u32,
    #[serde(with = "lenient_time::date")]
    pub match_date: NaiveDate,
}

/// One roster entry: a player registered to a tournament.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentPlayer {
    pub id: u64,
    pub player_id: UserId,
    #[serde(default, with = "lenient_time::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// The signed-in user's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub image: Option<String>,
}

// ---------------------------------------------------------------------------
// Response envelopes
// ---------------------------------------------------------------------------

// The API wraps every payload in a single-key object. A missing list key
// is treated as an empty list rather than a decode failure.

/// `GET /tournaments` → `{"Tournois": [...]}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TournamentList {
    #[serde(rename = "Tournois", default)]
    pub tournaments: Vec<Tournament>,
}

/// `GET /tournaments/:id` → `{"tournoi": {...}}`. Create and update may
/// also echo the stored tournament under the same key.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TournamentEnvelope {
    #[serde(default)]
    pub tournoi: Option<Tournament>,
}

/// `GET /tournoi/:id/players` → `{"players": [...]}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub players: Vec<TournamentPlayer>,
}

/// `GET /matches` → `{"matches": [...]}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchList {
    #[serde(default)]
    pub matches: Vec<Match>,
}

/// `GET /matches/:id` → `{"matche": {...}}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchEnvelope {
    #[serde(default)]
    pub matche: Option<Match>,
}

/// `POST /login` → `{"token": "...", "user": {...}}`.
///
/// Only the token is guaranteed. The user id may arrive as a nested user
/// or as a top-level `user_id`; when neither is present the caller has to
/// ask `GET /user`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default, rename = "user_id", alias = "userId")]
    pub top_level_user_id: Option<UserId>,
}

impl LoginResponse {
    /// Returns the signed-in user's id, if the response carried one.
    pub fn user_id(&self) -> Option<UserId> {
        self.top_level_user_id
            .or(self.user.as_ref().map(|u| u.id))
    }
}

/// `POST /register`. The body varies between deployments, so every field
/// is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub message: Option<String>,
}

/// The error fields of a failed response.
///
/// Decoded leniently: a body that isn't a JSON object, or whose fields
/// aren't strings, just yields `None`s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let Ok(serde_json::Value::Object(map)) = serde_json::from_slice::<serde_json::Value>(bytes) else {
            return Self::default();
        };
        let field = |key: &str| {
            map.get(key)
                .and_then(serde_json::Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        Self {
            error: field("error"),
            message: field("message"),
        }
    }

    /// The server's own wording: `error`, else `message`.
    pub fn text(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }
}

// ---------------------------------------------------------------------------
// Lenient time formats
// ---------------------------------------------------------------------------

/// The API is not consistent about time formats: timestamps arrive as
/// RFC 3339 (`2024-03-01T10:00:00.000000Z`) or as `2024-03-01 10:00:00`,
/// and match dates as either a bare date or a full timestamp.
mod lenient_time {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

    pub(crate) fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
        if let Ok(t) = DateTime::parse_from_rfc3339(s) {
            return Some(t.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
            .ok()
            .map(|t| t.and_utc())
    }

    pub(crate) fn parse_date(s: &str) -> Option<NaiveDate> {
        let prefix = s.get(..10)?;
        NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
    }

    pub mod timestamp {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            value: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(t) => serializer.serialize_str(&t.to_rfc3339()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            let raw = Option::<String>::deserialize(deserializer)?;
            match raw {
                None => Ok(None),
                Some(s) => super::parse_timestamp(&s)
                    .map(Some)
                    .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {s}"))),
            }
        }
    }

    pub mod date {
        use chrono::NaiveDate;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(value: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&value.format("%Y-%m-%d").to_string())
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
            let s = String::deserialize(deserializer)?;
            super::parse_date(&s)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {s}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_ids_are_bare_numbers() {
        assert_eq!(serde_json::to_string(&UserId(7)).unwrap(), "7");
        let id: TournamentId = serde_json::from_str("12").unwrap();
        assert_eq!(id, TournamentId(12));
        assert_eq!(MatchId(3).to_string(), "3");
    }

    #[test]
    fn test_tournament_list_uses_tournois_key() {
        let json = r#"{"Tournois":[{
            "id": 1, "name": "Spring Cup", "rules": "Best of three",
            "nb_players": 8, "image": "http://cdn/cup.png", "creator_id": 4,
            "created_at": "2024-03-01T10:00:00.000000Z",
            "updated_at": "2024-03-02 08:30:00"
        }]}"#;
        let list: TournamentList = serde_json::from_str(json).unwrap();
        let t = &list.tournaments[0];
        assert_eq!(t.id, TournamentId(1));
        assert_eq!(t.creator_id, UserId(4));
        assert_eq!(t.image.as_deref(), Some("http://cdn/cup.png"));
        assert_eq!(t.created_at.unwrap().hour(), 10);
        assert_eq!(t.updated_at.unwrap().minute(), 30);
    }

    #[test]
    fn test_missing_list_keys_are_empty() {
        let list: TournamentList = serde_json::from_str("{}").unwrap();
        assert!(list.tournaments.is_empty());
        let roster: Roster = serde_json::from_str(r#"{"message":"ok"}"#).unwrap();
        assert!(roster.players.is_empty());
        let matches: MatchList = serde_json::from_str("{}").unwrap();
        assert!(matches.matches.is_empty());
    }

    #[test]
    fn test_match_date_accepts_date_or_timestamp() {
        let json = r#"{"matche":{
            "id": 5, "tournoi_id": 1, "player_1_id": 2, "player_2_id": 3,
            "score_player_1": 2, "score_player_2": 1,
            "match_date": "2024-06-15 00:00:00"
        }}"#;
        let envelope: MatchEnvelope = serde_json::from_str(json).unwrap();
        let m = envelope.matche.unwrap();
        assert_eq!(m.match_date.day(), 15);
        assert_eq!(m.tournoi_id, TournamentId(1));

        let bad = r#"{"id":5,"tournoi_id":1,"player_1_id":2,"player_2_id":3,"match_date":"soon"}"#;
        assert!(serde_json::from_str::<Match>(bad).is_err());
    }

    #[test]
    fn test_match_date_serializes_as_plain_date() {
        let m = Match {
            id: MatchId(1),
            tournoi_id: TournamentId(1),
            player_1_id: UserId(1),
            player_2_id: UserId(2),
            score_player_1: 0,
            score_player_2: 0,
            match_date: NaiveDate::from_ymd_opt(2024, 1, 9).unwrap(),
        };
        let value = serde_json::to_value(&m).unwrap();
        assert_eq!(value["match_date"], "2024-01-09");
    }

    #[test]
    fn test_login_response_user_id_sources() {
        let nested: LoginResponse = serde_json::from_str(
            r#"{"token":"t","user":{"id":9,"name":"Ana","email":"ana@x.io"}}"#,
        )
        .unwrap();
        assert_eq!(nested.user_id(), Some(UserId(9)));

        let flat: LoginResponse = serde_json::from_str(r#"{"token":"t","userId":3}"#).unwrap();
        assert_eq!(flat.user_id(), Some(UserId(3)));

        let bare: LoginResponse = serde_json::from_str(r#"{"token":"t"}"#).unwrap();
        assert_eq!(bare.user_id(), None);
    }

    #[test]
    fn test_error_body_prefers_error_field() {
        let body = ErrorBody::from_bytes(br#"{"error":"Invalid credentials","message":"x"}"#);
        assert_eq!(body.text(), Some("Invalid credentials"));

        let body = ErrorBody::from_bytes(br#"{"message":"The name field is required."}"#);
        assert_eq!(body.text(), Some("The name field is required."));

        let body = ErrorBody::from_bytes(b"<html>502</html>");
        assert_eq!(body, ErrorBody::default());

        let body = ErrorBody::from_bytes(br#"{"error":{"code":1}}"#);
        assert_eq!(body.text(), None);
    }
}
