//! The route guard: which screen a path actually shows.

use tourney_session::SessionContext;

use crate::Route;

/// Outcome of [`RouteGuard::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Show the requested route.
    Render(Route),
    /// Show this route instead.
    Redirect(Route),
}

impl Resolution {
    /// The route that ends up on screen.
    pub fn route(&self) -> Route {
        match self {
            Self::Render(route) | Self::Redirect(route) => *route,
        }
    }
}

/// Gates routes on session presence.
///
/// | Path | Session | Result |
/// |---|---|---|
/// | guarded route | yes | render |
/// | guarded route | no | redirect `/login` |
/// | `/login`, `/register` | any | render |
/// | `/` or unknown | yes | redirect `/tournaments` |
/// | `/` or unknown | no | redirect `/login` |
#[derive(Debug, Clone)]
pub struct RouteGuard {
    session: SessionContext,
}

impl RouteGuard {
    pub fn new(session: SessionContext) -> Self {
        Self { session }
    }

    pub fn resolve(&self, path: &str) -> Resolution {
        let authenticated = self.session.is_authenticated();
        match Route::parse(path) {
            Some(route) if route.is_public() || authenticated => Resolution::Render(route),
            Some(_) => Resolution::Redirect(Route::Login),
            None if authenticated => Resolution::Redirect(Route::Tournaments),
            None => Resolution::Redirect(Route::Login),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tourney_protocol::MatchId;

    fn signed_in() -> SessionContext {
        let session = SessionContext::in_memory();
        session.start("tok", None).unwrap();
        session
    }

    #[test]
    fn test_guarded_route_needs_session() {
        let guard = RouteGuard::new(SessionContext::in_memory());
        assert_eq!(guard.resolve("/matches/4"), Resolution::Redirect(Route::Login));

        let guard = RouteGuard::new(signed_in());
        assert_eq!(
            guard.resolve("/matches/4"),
            Resolution::Render(Route::MatchDetails(MatchId(4)))
        );
    }

    #[test]
    fn test_public_routes_always_render() {
        for session in [SessionContext::in_memory(), signed_in()] {
            let guard = RouteGuard::new(session);
            assert_eq!(guard.resolve("/login"), Resolution::Render(Route::Login));
            assert_eq!(guard.resolve("/register"), Resolution::Render(Route::Register));
        }
    }

    #[test]
    fn test_root_and_unknown_follow_session() {
        let guard = RouteGuard::new(signed_in());
        assert_eq!(guard.resolve("/"), Resolution::Redirect(Route::Tournaments));
        assert_eq!(guard.resolve("/nowhere").route(), Route::Tournaments);

        let guard = RouteGuard::new(SessionContext::in_memory());
        assert_eq!(guard.resolve("/"), Resolution::Redirect(Route::Login));
    }

    #[test]
    fn test_guard_reads_session_on_every_call() {
        let session = signed_in();
        let guard = RouteGuard::new(session.clone());
        assert_eq!(guard.resolve("/profile"), Resolution::Render(Route::Profile));

        session.end(tourney_session::EndReason::Logout).unwrap();
        assert_eq!(guard.resolve("/profile"), Resolution::Redirect(Route::Login));
    }
}
