//! What every view is handed when it is created.

use std::sync::Arc;

use tourney_client::ApiClient;
use tourney_session::SessionContext;
use tourney_transport::Transport;

use crate::{Navigator, Route};

/// The access layer and the navigator, shared by all views.
pub struct ViewContext<T: Transport> {
    client: ApiClient<T>,
    navigator: Arc<dyn Navigator>,
}

impl<T: Transport> Clone for ViewContext<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            navigator: Arc::clone(&self.navigator),
        }
    }
}

impl<T: Transport> ViewContext<T> {
    pub fn new(client: ApiClient<T>, navigator: Arc<dyn Navigator>) -> Self {
        Self { client, navigator }
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    pub fn session(&self) -> &SessionContext {
        self.client.session()
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    pub fn navigate(&self, route: Route) {
        self.navigator.navigate(route);
    }
}
