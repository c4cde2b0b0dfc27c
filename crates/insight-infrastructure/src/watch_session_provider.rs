//! In-process SessionProvider backed by a tokio watch channel.

use insight_core::auth::{AuthSession, SessionProvider};
use tokio::sync::watch;

/// Holds the current session and broadcasts changes to subscribers.
///
/// The sign-in flow itself lives elsewhere; it calls [`sign_in`](Self::sign_in)
/// and [`sign_out`](Self::sign_out) to publish the outcome.
pub struct WatchSessionProvider {
    sender: watch::Sender<Option<AuthSession>>,
}

impl WatchSessionProvider {
    pub fn new(initial: Option<AuthSession>) -> Self {
        let (sender, _receiver) = watch::channel(initial);
        Self { sender }
    }

    /// A provider with no session.
    pub fn signed_out() -> Self {
        Self::new(None)
    }

    pub fn sign_in(&self, session: AuthSession) {
        tracing::info!(user_id = %session.user_id, "Session started");
        self.sender.send_replace(Some(session));
    }

    pub fn sign_out(&self) {
        if self.sender.send_replace(None).is_some() {
            tracing::info!("Session ended");
        }
    }
}

impl SessionProvider for WatchSessionProvider {
    fn current(&self) -> Option<AuthSession> {
        self.sender.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<AuthSession>> {
        self.sender.subscribe()
    }
}
