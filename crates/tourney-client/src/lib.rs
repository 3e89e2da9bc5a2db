//! # tourney-client
//!
//! The HTTP access layer for the Tourney API.
//!
//! An [`ApiClient`] owns a [`Transport`](tourney_transport::Transport), a
//! [`SessionContext`](tourney_session::SessionContext) and an ordered chain
//! of [`Interceptor`]s. Resource calls go through three façades:
//!
//! ```text
//! client.auth()         login, register, logout, profile
//! client.tournaments()  CRUD plus roster join/leave
//! client.matches()      CRUD
//! ```
//!
//! Every call returns `Result<_, ApiError>`. Views reduce an error to one
//! line of text with [`classify`].
//!
//! ## Feature flags
//!
//! - `http` (default): [`ApiClientBuilder::build_http`] over `reqwest`.

mod client;
mod config;
mod error;
mod failure;
pub mod interceptor;
pub mod services;

pub use client::{ApiClient, ApiClientBuilder};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use failure::{classify, ApiFailure, FALLBACK_MESSAGE, NO_RESPONSE_MESSAGE, SETUP_MESSAGE};
pub use interceptor::{BearerAuth, Interceptor, MultipartContentType, UnauthorizedTeardown};
pub use services::{AuthService, MatchService, TournamentService};
