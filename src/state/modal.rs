//! Which dialog the host application has open.

use std::sync::Arc;

use tokio::sync::watch;

use super::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    Login,
    Signup,
    TextInput,
    #[default]
    Closed,
}

#[derive(Debug, Clone, Default)]
pub struct Modal {
    store: Arc<Store<ModalState>>,
}

impl Modal {
    pub fn set(&self, state: ModalState) {
        self.store.set(state);
    }

    pub fn close(&self) {
        self.store.set(ModalState::Closed);
    }

    pub fn get(&self) -> ModalState {
        self.store.get()
    }

    pub fn is_open(&self) -> bool {
        self.get() != ModalState::Closed
    }

    pub fn subscribe(&self) -> watch::Receiver<ModalState> {
        self.store.subscribe()
    }
}
