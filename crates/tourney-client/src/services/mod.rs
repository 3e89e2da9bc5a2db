//! Resource façades.
//!
//! Each façade borrows an [`ApiClient`](crate::ApiClient) and exposes one
//! remote resource. Every method issues exactly one HTTP call and returns
//! the server's failure unchanged as an [`ApiError`](crate::ApiError).

mod auth;
mod matches;
mod tournaments;

pub use auth::AuthService;
pub use matches::MatchService;
pub use tournaments::TournamentService;
