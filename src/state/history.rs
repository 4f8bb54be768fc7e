//! Back/forward navigation history.

use std::sync::Arc;

use tokio::sync::watch;

use super::store::Store;
use crate::path::Path;

/// Visited paths plus a cursor at the current one.
///
/// `None` entries mean "no folder open". The list is never empty and the
/// cursor always points at a valid slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationHistory {
    paths: Vec<Option<Path>>,
    index: usize,
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self {
            paths: vec![None],
            index: 0,
        }
    }
}

impl NavigationHistory {
    pub fn paths(&self) -> &[Option<Path>] {
        &self.paths
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Always false; kept for symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// The entry under the cursor.
    pub fn current(&self) -> Option<&Path> {
        self.paths.get(self.index).and_then(Option::as_ref)
    }

    /// Navigate to `path`.
    ///
    /// Pushing the current path again only rewrites the current slot. Any
    /// other path drops the entries after the cursor and is appended.
    pub fn push(&mut self, path: &Path) {
        if self.current() == Some(path) {
            self.paths[self.index] = Some(path.clone());
            return;
        }
        self.paths.truncate(self.index + 1);
        self.paths.push(Some(path.clone()));
        self.index += 1;
    }

    pub fn go_back(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    pub fn go_forward(&mut self) {
        self.index = (self.index + 1).min(self.paths.len() - 1);
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.paths.len()
    }

    /// Drop everything and start over from `path`.
    pub fn replace(&mut self, path: &Path) {
        *self = Self::default();
        self.push(path);
    }

    /// Back to the initial single empty entry.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// A copy of the path under the cursor, or `None` when no folder is open.
pub fn current_path(history: &NavigationHistory) -> Option<Path> {
    history.current().cloned()
}

/// Shared, observable navigation history.
#[derive(Debug, Clone, Default)]
pub struct PathsHistory {
    store: Arc<Store<NavigationHistory>>,
}

impl PathsHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, path: &Path) {
        self.store.update(|h| h.push(path));
    }

    /// No-op at the start of history.
    pub fn go_back(&self) {
        self.store.update(NavigationHistory::go_back);
    }

    /// No-op at the end of history.
    pub fn go_forward(&self) {
        self.store.update(NavigationHistory::go_forward);
    }

    /// Re-notify subscribers so views reload the current folder.
    pub fn refresh(&self) {
        self.store.touch();
    }

    pub fn replace(&self, path: &Path) {
        self.store.update(|h| h.replace(path));
    }

    pub fn clear(&self) {
        self.store.update(NavigationHistory::clear);
    }

    /// A snapshot of the whole history.
    pub fn get(&self) -> NavigationHistory {
        self.store.get()
    }

    /// A copy of the current path.
    pub fn current_path(&self) -> Option<Path> {
        self.store.with(current_path)
    }

    pub fn can_go_back(&self) -> bool {
        self.store.with(NavigationHistory::can_go_back)
    }

    pub fn can_go_forward(&self) -> bool {
        self.store.with(NavigationHistory::can_go_forward)
    }

    pub fn subscribe(&self) -> watch::Receiver<NavigationHistory> {
        self.store.subscribe()
    }
}
