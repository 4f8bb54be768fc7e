//! Session lifecycle events and the handler that resets client state.

use std::fmt;
use std::sync::{Arc, RwLock};

use tracing::{info, warn};

use super::account::User;
use crate::state::AppState;

/// Something happened to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Login or signup finished and the identity was loaded.
    LoggedIn(User),
    /// The user logged out (or deleted the account).
    LoggedOut,
    /// An authenticated call was rejected with 401.
    AuthorizationLost,
}

/// Receives session events synchronously, before the emitting call returns.
pub trait SessionListener: Send + Sync {
    fn on_event(&self, event: &SessionEvent);
}

impl<F> SessionListener for F
where
    F: Fn(&SessionEvent) + Send + Sync,
{
    fn on_event(&self, event: &SessionEvent) {
        self(event)
    }
}

/// Listener registry shared by the request layer and the session.
#[derive(Clone, Default)]
pub struct SessionEvents {
    listeners: Arc<RwLock<Vec<Arc<dyn SessionListener>>>>,
}

impl SessionEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: Arc<dyn SessionListener>) {
        self.listeners
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(listener);
    }

    /// Deliver `event` to every listener in registration order.
    pub fn emit(&self, event: &SessionEvent) {
        let listeners = self
            .listeners
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        for listener in listeners {
            listener.on_event(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

impl fmt::Debug for SessionEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionEvents")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Clears all shared state when the session ends.
#[derive(Debug, Clone)]
pub struct SessionReset {
    state: AppState,
}

impl SessionReset {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl SessionListener for SessionReset {
    fn on_event(&self, event: &SessionEvent) {
        match event {
            SessionEvent::AuthorizationLost => {
                warn!("session rejected by server, resetting client state");
                self.state.reset_session();
            }
            SessionEvent::LoggedOut => {
                info!("logged out");
                self.state.reset_session();
            }
            SessionEvent::LoggedIn(user) => {
                info!(username = %user.username, "logged in");
            }
        }
    }
}
