//! Observable client state shared between the session and the host UI.
//!
//! Each container is a cheap handle; clones observe and mutate the same
//! value. Subscribe to a container to be notified of changes.

mod account;
mod file_move;
mod history;
mod modal;
mod selection;
mod store;

use std::sync::{Arc, Mutex};

use tracing::debug;

pub use account::Account;
pub use file_move::FileMove;
pub use history::{NavigationHistory, PathsHistory, current_path};
pub use modal::{Modal, ModalState};
pub use selection::{SelectedFiles, Selection, SelectionMode};
pub use store::Store;

/// All shared containers of one client.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub history: PathsHistory,
    pub selection: SelectedFiles,
    pub file_move: FileMove,
    pub account: Account,
    pub modal: Modal,
    reset_guard: Arc<Mutex<()>>,
}

impl AppState {
    /// State with the given selection behavior.
    pub fn with_selection_mode(mode: SelectionMode) -> Self {
        Self {
            selection: SelectedFiles::new(mode),
            ..Self::default()
        }
    }

    /// Return every container to its logged-out initial value.
    ///
    /// Runs as one unit: concurrent resets are serialized and nothing
    /// awaits in between, so no reference from the old session survives.
    pub fn reset_session(&self) {
        let _guard = self
            .reset_guard
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        self.modal.close();
        self.account.logout();
        self.history.clear();
        self.selection.clear();
        self.file_move.cancel();
        debug!("session state reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::node::tests::file;
    use crate::path::{Path, PathEntry};
    use crate::session::account::tests::user;

    #[test]
    fn test_reset_session() {
        let state = AppState::default();
        state.modal.set(ModalState::TextInput);
        state.account.login(user());
        state.history.push(&Path::root(PathEntry::new(1, "My Cloud")));
        state.selection.add(file(3, "a.txt", 1).into());
        state.file_move.set(file(3, "a.txt", 1).into());

        let observer = state.clone();
        state.reset_session();

        assert_eq!(observer.modal.get(), ModalState::Closed);
        assert!(!observer.account.is_logged_in());
        assert_eq!(observer.history.get(), NavigationHistory::default());
        assert!(observer.selection.is_empty());
        assert!(!observer.file_move.is_pending());
    }

    #[test]
    fn test_with_selection_mode() {
        let state = AppState::with_selection_mode(SelectionMode::Multi);
        assert_eq!(state.selection.mode(), SelectionMode::Multi);
        assert_eq!(AppState::default().selection.mode(), SelectionMode::Single);
    }
}
