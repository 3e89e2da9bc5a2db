//! Headless view models, one per screen.
//!
//! A view holds what its screen renders and exposes the user's actions as
//! async methods. `mount()` does what the screen does when it first
//! appears; every other method is one user action. Nothing is cached
//! between views: each one fetches on mount.

mod auth;
mod matches;
mod profile;
mod roster;
mod tournaments;

pub use auth::{logout, LoginView, RegisterView};
pub use matches::{CreateMatchView, EditMatchView, MatchDetailsView, MatchListView};
pub use profile::{ProfileView, PROFILE_UPDATED};
pub use roster::RosterView;
pub use tournaments::{
    CreateTournamentView, EditTournamentView, TournamentDetailsView, TournamentListView,
};
