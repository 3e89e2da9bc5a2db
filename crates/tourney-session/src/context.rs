//! The session context: one owner for the credentials and their lifecycle.
//!
//! Everything that needs to know "who is signed in" asks the context
//! instead of reading storage directly: the access layer (to attach the
//! bearer token), the route guard (to gate views), and the views (to
//! compare ids with [`SessionContext::is_current_user`]).
//!
//! # Lifecycle
//!
//! ```text
//! init(store) ──→ start(token, user) ──→ end(Logout | Unauthorized)
//!                       │                         │
//!                       ▼                         ▼
//!               SessionEvent::Started    SessionEvent::Ended
//! ```
//!
//! Listeners registered with [`subscribe`](SessionContext::subscribe) are
//! called synchronously on the thread that caused the transition. The
//! top-level router subscribes to `Ended` to send the user back to login,
//! which keeps navigation out of the transport layer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tourney_protocol::UserId;

use crate::{
    EndReason, KeyValueStore, MemoryStore, Session, SessionError, SessionEvent, TOKEN_KEY,
    USER_ID_KEY,
};

type Listener = Arc<dyn Fn(&SessionEvent) + Send + Sync>;

/// Handle returned by [`SessionContext::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Inner {
    store: Box<dyn KeyValueStore>,
    /// Held while a transition reads and rewrites the store.
    transition: Mutex<()>,
    listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
    next_subscription: AtomicU64,
}

/// Shared handle to the client session. Cloning is cheap and every clone
/// sees the same store and listeners.
#[derive(Clone)]
pub struct SessionContext {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("authenticated", &self.is_authenticated())
            .field("user_id", &self.user_id())
            .finish()
    }
}

impl SessionContext {
    /// Wraps `store`, restoring whatever session it already holds.
    pub fn init(store: impl KeyValueStore) -> Self {
        let context = Self {
            inner: Arc::new(Inner {
                store: Box::new(store),
                transition: Mutex::new(()),
                listeners: Mutex::new(Vec::new()),
                next_subscription: AtomicU64::new(1),
            }),
        };
        if context.is_authenticated() {
            tracing::info!(user_id = ?context.user_id(), "session restored from storage");
        } else {
            tracing::debug!("no stored session");
        }
        context
    }

    /// A context over a fresh [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self::init(MemoryStore::new())
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub fn token(&self) -> Option<String> {
        self.inner.store.get(TOKEN_KEY)
    }

    pub fn user_id(&self) -> Option<String> {
        self.inner.store.get(USER_ID_KEY)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn snapshot(&self) -> Session {
        Session {
            token: self.token(),
            user_id: self.user_id(),
        }
    }

    /// Returns `true` if `id` is the signed-in user.
    ///
    /// This is the only place ids are compared against the session; with
    /// no stored user id, nobody is the current user.
    pub fn is_current_user(&self, id: UserId) -> bool {
        self.user_id()
            .is_some_and(|stored| stored.trim() == id.to_string())
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    /// Stores a new session after a successful login.
    ///
    /// A previous user id is dropped when `user_id` is `None`, so a stale
    /// id can never pair with a fresh token.
    pub fn start(&self, token: &str, user_id: Option<UserId>) -> Result<(), SessionError> {
        {
            let _guard = self.transition();
            let store = &self.inner.store;
            store.set(TOKEN_KEY, token)?;
            match user_id {
                Some(id) => store.set(USER_ID_KEY, &id.to_string())?,
                None => store.remove(USER_ID_KEY)?,
            }
        }
        tracing::info!(user_id = ?user_id, "session started");
        self.emit(&SessionEvent::Started {
            user_id: user_id.map(|id| id.to_string()),
        });
        Ok(())
    }

    /// Records the user id of a session whose login response lacked one.
    pub fn set_user_id(&self, id: UserId) -> Result<(), SessionError> {
        self.inner.store.set(USER_ID_KEY, &id.to_string())
    }

    /// Clears both keys.
    ///
    /// Emits [`SessionEvent::Ended`] only if there was something to clear.
    /// The check and the removals happen under one lock, so a burst of
    /// 401s from parallel requests produces one event.
    /// Both removals are attempted even if the first fails.
    pub fn end(&self, reason: EndReason) -> Result<(), SessionError> {
        let had_session = {
            let _guard = self.transition();
            let had_session = self.token().is_some() || self.user_id().is_some();
            let token_result = self.inner.store.remove(TOKEN_KEY);
            let user_result = self.inner.store.remove(USER_ID_KEY);
            token_result?;
            user_result?;
            had_session
        };

        if !had_session {
            return Ok(());
        }
        match reason {
            EndReason::Logout => tracing::info!(%reason, "session ended"),
            EndReason::Unauthorized => tracing::warn!(%reason, "session ended"),
        }
        self.emit(&SessionEvent::Ended { reason });
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Events
    // -----------------------------------------------------------------------

    /// Registers a listener for lifecycle events.
    pub fn subscribe(
        &self,
        listener: impl Fn(&SessionEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.listeners().push((id, Arc::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners();
        let before = listeners.len();
        listeners.retain(|(sid, _)| *sid != id);
        listeners.len() != before
    }

    fn emit(&self, event: &SessionEvent) {
        // Snapshot first: a listener may itself subscribe or read the session.
        let listeners: Vec<Listener> = self.listeners().iter().map(|(_, l)| Arc::clone(l)).collect();
        for listener in listeners {
            listener(event);
        }
    }

    fn transition(&self) -> std::sync::MutexGuard<'_, ()> {
        self.inner
            .transition
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn listeners(&self) -> std::sync::MutexGuard<'_, Vec<(SubscriptionId, Listener)>> {
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
