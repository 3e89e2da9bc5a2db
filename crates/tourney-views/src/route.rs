//! Client-side routes.

use std::fmt;

use tourney_protocol::{MatchId, TournamentId};

/// Every screen the client can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    Profile,
    Tournaments,
    CreateTournament,
    TournamentDetails(TournamentId),
    EditTournament(TournamentId),
    Matches,
    CreateMatch,
    MatchDetails(MatchId),
    EditMatch(MatchId),
}

impl Route {
    /// Parses a path such as `/tournaments/3/edit`.
    ///
    /// Query strings, fragments and a trailing slash are ignored. Returns
    /// `None` for `/` and for anything unrecognised.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let route = match segments.as_slice() {
            ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["profile"] => Self::Profile,
            ["tournaments"] => Self::Tournaments,
            ["tournaments", "create"] => Self::CreateTournament,
            ["tournaments", id] => Self::TournamentDetails(TournamentId(id.parse().ok()?)),
            ["tournaments", id, "edit"] => Self::EditTournament(TournamentId(id.parse().ok()?)),
            ["matches"] => Self::Matches,
            ["matches", "create"] => Self::CreateMatch,
            ["matches", id] => Self::MatchDetails(MatchId(id.parse().ok()?)),
            ["matches", id, "edit"] => Self::EditMatch(MatchId(id.parse().ok()?)),
            _ => return None,
        };
        Some(route)
    }

    /// The canonical path for this route.
    pub fn path(&self) -> String {
        match self {
            Self::Login => "/login".into(),
            Self::Register => "/register".into(),
            Self::Profile => "/profile".into(),
            Self::Tournaments => "/tournaments".into(),
            Self::CreateTournament => "/tournaments/create".into(),
            Self::TournamentDetails(id) => format!("/tournaments/{id}"),
            Self::EditTournament(id) => format!("/tournaments/{id}/edit"),
            Self::Matches => "/matches".into(),
            Self::CreateMatch => "/matches/create".into(),
            Self::MatchDetails(id) => format!("/matches/{id}"),
            Self::EditMatch(id) => format!("/matches/{id}/edit"),
        }
    }

    /// Login and register are reachable without a session.
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_route() {
        let routes = [
            Route::Login,
            Route::Register,
            Route::Profile,
            Route::Tournaments,
            Route::CreateTournament,
            Route::TournamentDetails(TournamentId(3)),
            Route::EditTournament(TournamentId(3)),
            Route::Matches,
            Route::CreateMatch,
            Route::MatchDetails(MatchId(12)),
            Route::EditMatch(MatchId(12)),
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()), Some(route), "{route}");
        }
    }

    #[test]
    fn test_parse_tolerates_trailing_slash_and_query() {
        assert_eq!(Route::parse("/matches/"), Some(Route::Matches));
        assert_eq!(
            Route::parse("/tournaments/7?tab=players"),
            Some(Route::TournamentDetails(TournamentId(7)))
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(Route::parse("/"), None);
        assert_eq!(Route::parse("/tournaments/abc"), None);
        assert_eq!(Route::parse("/matches/1/delete"), None);
        assert_eq!(Route::parse("/admin"), None);
    }

    #[test]
    fn test_only_auth_routes_are_public() {
        assert!(Route::Login.is_public());
        assert!(Route::Register.is_public());
        assert!(!Route::Profile.is_public());
        assert!(!Route::MatchDetails(MatchId(1)).is_public());
    }
}
