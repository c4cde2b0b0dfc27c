//! Authentication collaborator interface.
//!
//! Session lifecycle lives outside this crate; the research flow only needs
//! to know whether a session is present and to be told when that changes.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// An authenticated user session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Source of truth for the current session.
pub trait SessionProvider: Send + Sync {
    /// The current session, or `None` when signed out.
    fn current(&self) -> Option<AuthSession>;

    /// A receiver notified on every session change.
    fn subscribe(&self) -> watch::Receiver<Option<AuthSession>>;
}
