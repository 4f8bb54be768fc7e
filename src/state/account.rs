//! The logged-in user.

use std::sync::Arc;

use tokio::sync::watch;

use super::store::Store;
use crate::session::User;

/// Identity of the current session; `None` when logged out.
#[derive(Debug, Clone, Default)]
pub struct Account {
    store: Arc<Store<Option<User>>>,
}

impl Account {
    pub fn login(&self, user: User) {
        self.store.set(Some(user));
    }

    pub fn logout(&self) {
        self.store.set(None);
    }

    pub fn get(&self) -> Option<User> {
        self.store.get()
    }

    pub fn is_logged_in(&self) -> bool {
        self.store.with(Option::is_some)
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.store.subscribe()
    }
}
