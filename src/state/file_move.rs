//! The node staged for a move.

use std::sync::Arc;

use tokio::sync::watch;

use super::store::Store;
use crate::fs::Node;

/// Holds at most one node waiting for a destination folder.
#[derive(Debug, Clone, Default)]
pub struct FileMove {
    store: Arc<Store<Option<Node>>>,
}

impl FileMove {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a node, replacing any staged one.
    pub fn set(&self, node: Node) {
        self.store.set(Some(node));
    }

    pub fn cancel(&self) {
        self.store.set(None);
    }

    pub fn get(&self) -> Option<Node> {
        self.store.get()
    }

    pub fn is_pending(&self) -> bool {
        self.store.with(Option::is_some)
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Node>> {
        self.store.subscribe()
    }
}
