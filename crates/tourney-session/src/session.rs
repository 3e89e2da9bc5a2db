//! Session types: the credential pair and its lifecycle events.

use std::fmt;

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Storage key for the signed-in user's id.
pub const USER_ID_KEY: &str = "userId";

/// A snapshot of the client-held credentials.
///
/// Both fields are opaque strings, exactly as stored. A session with a
/// token but no user id is valid: some login responses omit the id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub user_id: Option<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The user logged out.
    Logout,
    /// The server answered 401: the token is invalid or expired.
    Unauthorized,
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Logout => write!(f, "logout"),
            Self::Unauthorized => write!(f, "unauthorized"),
        }
    }
}

/// Emitted by [`SessionContext`](crate::SessionContext) on every
/// lifecycle transition.
///
/// ```text
///   (none) ──start()──→ Started ──end(reason)──→ Ended { reason }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Started { user_id: Option<String> },
    Ended { reason: EndReason },
}
