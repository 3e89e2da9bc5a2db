//! Navigation: how a view moves the user to another screen.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::Route;

/// Moves the user to another route.
///
/// Views never render their successors; they ask the navigator. The
/// session listener installed by the app uses the same navigator to send
/// the user to login when a session ends.
pub trait Navigator: Send + Sync + 'static {
    fn navigate(&self, route: Route);

    /// The route currently on screen, if any.
    fn current(&self) -> Option<Route>;
}

/// An in-memory navigation stack.
///
/// Navigating to the route already on top is a no-op, so a logout that
/// races a 401 teardown leaves one `/login` entry, not two.
///
/// Cloning shares the stack.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Arc<Mutex<Vec<Route>>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the stack at `route`.
    pub fn starting_at(route: Route) -> Self {
        Self {
            entries: Arc::new(Mutex::new(vec![route])),
        }
    }

    /// Every route visited, oldest first.
    pub fn entries(&self) -> Vec<Route> {
        self.lock().clone()
    }

    /// Pops the current route and returns the one below it.
    pub fn back(&self) -> Option<Route> {
        let mut entries = self.lock();
        if entries.len() > 1 {
            entries.pop();
        }
        entries.last().copied()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Route>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Navigator for History {
    fn navigate(&self, route: Route) {
        let mut entries = self.lock();
        if entries.last() == Some(&route) {
            return;
        }
        tracing::debug!(%route, "navigate");
        entries.push(route);
    }

    fn current(&self) -> Option<Route> {
        self.lock().last().copied()
    }
}
