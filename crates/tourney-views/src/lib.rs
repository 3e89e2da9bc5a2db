//! Routing and headless view models for Tourney.
//!
//! # Key types
//!
//! - [`Route`]: every screen, parsed from and rendered to a path
//! - [`RouteGuard`]: decides whether a path renders or redirects
//! - [`Navigator`]: how views move the user on ([`History`] keeps a stack in memory)
//! - [`Confirm`]: the yes/no prompt before deleting or leaving
//! - [`ViewState`]: data, spinner and error line for one screen
//! - [`views`]: one view model per screen

mod confirm;
mod context;
mod error;
mod guard;
mod navigator;
mod route;
mod state;
pub mod views;

pub use confirm::{Confirm, DELETE_MATCH_PROMPT, DELETE_TOURNAMENT_PROMPT, LEAVE_TOURNAMENT_PROMPT};
pub use context::ViewContext;
pub use error::ViewError;
pub use guard::{Resolution, RouteGuard};
pub use navigator::{History, Navigator};
pub use route::Route;
pub use state::{render_error, ViewState};
