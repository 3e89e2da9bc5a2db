//! Client session management for Tourney.
//!
//! This crate owns the one piece of durable client state: the bearer
//! token and the signed-in user's id.
//!
//! 1. **Storage**: where the pair lives ([`KeyValueStore`] trait,
//!    [`MemoryStore`], durable [`FileStore`])
//! 2. **Context**: who is signed in, and what happens when that changes
//!    ([`SessionContext`], [`SessionEvent`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Views / Router (above)  ← ask is_current_user(), react to Ended events
//!     ↕
//! Session Layer (this crate)  ← token + userId, lifecycle events
//!     ↕
//! Client Layer (beside)  ← reads the token per request, ends the session on 401
//! ```

mod context;
mod error;
mod session;
mod store;

pub use context::{SessionContext, SubscriptionId};
pub use error::SessionError;
pub use session::{EndReason, Session, SessionEvent, TOKEN_KEY, USER_ID_KEY};
pub use store::{FileStore, KeyValueStore, MemoryStore};
