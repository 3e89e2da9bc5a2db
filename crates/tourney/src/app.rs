//! The application shell: session, access layer, router and navigation
//! wired together.

use std::sync::Arc;

use tourney_client::{ApiClient, ApiClientBuilder, ClientConfig};
use tourney_session::{FileStore, SessionContext, SessionEvent, SubscriptionId};
use tourney_transport::Transport;
use tourney_views::{History, Navigator, Route, RouteGuard, ViewContext};

use crate::{AppConfig, TourneyError};

#[cfg(feature = "http")]
use tourney_transport::HttpTransport;

/// A running client.
///
/// The app subscribes to the session: whenever it ends, for a logout or
/// because the server answered 401, the app navigates to `/login`. Views
/// and the access layer never route there themselves.
pub struct App<T: Transport> {
    ctx: ViewContext<T>,
    guard: RouteGuard,
    history: History,
    subscription: SubscriptionId,
}

#[cfg(feature = "http")]
impl App<HttpTransport> {
    /// Opens the configured session store and connects to the configured
    /// API over HTTP.
    pub fn from_config(config: &AppConfig) -> Result<Self, TourneyError> {
        let session = match &config.session_file {
            Some(path) => SessionContext::init(FileStore::open(path)?),
            None => SessionContext::in_memory(),
        };
        let client = ApiClientBuilder::new()
            .config(config.client_config())
            .session(session)
            .build_http()?;
        tracing::info!(api_url = %config.api_url, "client ready");
        Ok(Self::wire(client))
    }
}

impl<T: Transport> App<T> {
    /// Builds an app over any transport.
    pub fn with_transport(session: SessionContext, config: ClientConfig, transport: T) -> Self {
        let client = ApiClientBuilder::new()
            .config(config)
            .session(session)
            .build(transport);
        Self::wire(client)
    }

    fn wire(client: ApiClient<T>) -> Self {
        let history = History::new();
        let navigator: Arc<dyn Navigator> = Arc::new(history.clone());

        let on_end = Arc::clone(&navigator);
        let subscription = client.session().subscribe(move |event| {
            if let SessionEvent::Ended { reason } = event {
                tracing::info!(%reason, "session ended, returning to login");
                on_end.navigate(Route::Login);
            }
        });

        Self {
            guard: RouteGuard::new(client.session().clone()),
            ctx: ViewContext::new(client, navigator),
            history,
            subscription,
        }
    }

    /// Resolves `path` through the route guard and navigates to whatever
    /// it settles on.
    pub fn open(&self, path: &str) -> Route {
        let resolution = self.guard.resolve(path);
        let route = resolution.route();
        if route.path() != path {
            tracing::debug!(requested = path, %route, "redirected");
        }
        self.ctx.navigate(route);
        route
    }

    /// What every view is built from.
    pub fn context(&self) -> &ViewContext<T> {
        &self.ctx
    }

    pub fn client(&self) -> &ApiClient<T> {
        self.ctx.client()
    }

    pub fn session(&self) -> &SessionContext {
        self.ctx.session()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// The route currently on screen.
    pub fn current(&self) -> Option<Route> {
        self.history.current()
    }
}

impl<T: Transport> Drop for App<T> {
    fn drop(&mut self) {
        self.ctx.session().unsubscribe(self.subscription);
    }
}
