//! # Tourney
//!
//! Client for a tournament and match management API.
//!
//! Tourney keeps a bearer-token session, talks to the API through an
//! interceptor-driven access layer, and exposes every screen as a headless
//! view model that a terminal, GUI or test can drive.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tourney::prelude::*;
//!
//! # async fn run() -> Result<(), TourneyError> {
//! let config = AppConfig::from_env()?;
//! tourney::logging::init(&config.log_filter);
//!
//! let app = App::from_config(&config)?;
//! if app.open("/") == Route::Login {
//!     let mut login = LoginView::new(app.context().clone());
//!     login.credentials = Credentials::new("ada@example.com", "secret");
//!     login.submit().await?;
//! }
//!
//! let mut list = TournamentListView::new(app.context().clone());
//! list.mount().await;
//! # Ok(())
//! # }
//! ```

mod app;
mod config;
mod error;
pub mod logging;

pub use app::App;
pub use config::{AppConfig, API_URL_VAR, LOG_VAR, SESSION_FILE_VAR, TIMEOUT_VAR};
pub use error::TourneyError;

pub use tourney_client as client;
pub use tourney_protocol as protocol;
pub use tourney_session as session;
pub use tourney_transport as transport;
pub use tourney_views as views;

/// Everything an application built on Tourney usually needs.
pub mod prelude {
    pub use crate::{App, AppConfig, TourneyError};
    pub use tourney_client::{classify, ApiClient, ApiError, ApiFailure, ClientConfig};
    pub use tourney_protocol::{
        Credentials, FileUpload, Match, MatchForm, MatchId, ProfileUpdate, Registration,
        Tournament, TournamentForm, TournamentId, TournamentPlayer, User, UserId,
    };
    pub use tourney_session::{EndReason, SessionContext, SessionEvent};
    pub use tourney_transport::{ScriptedTransport, Transport};
    pub use tourney_views::views::*;
    pub use tourney_views::{Confirm, History, Navigator, Route, RouteGuard, ViewContext, ViewError};

    #[cfg(feature = "http")]
    pub use tourney_transport::HttpTransport;
}
