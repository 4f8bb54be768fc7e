//! Selected files and folders.

use std::sync::Arc;

use tokio::sync::watch;

use super::store::Store;
use crate::fs::{Node, NodeKey};

/// How [`SelectedFiles::add`] treats existing entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Adding a node replaces the current selection.
    #[default]
    Single,
    /// Adding a node keeps the current selection.
    Multi,
}

/// Nodes in the order they were selected, unique by [`NodeKey`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    nodes: Vec<Node>,
}

impl Selection {
    pub fn contains(&self, key: &NodeKey) -> bool {
        self.nodes.iter().any(|n| n.key() == *key)
    }

    /// The earliest selected node still in the set.
    pub fn first(&self) -> Option<&Node> {
        self.nodes.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn insert(&mut self, node: Node) {
        if let Some(existing) = self.nodes.iter_mut().find(|n| n.key() == node.key()) {
            *existing = node;
        } else {
            self.nodes.push(node);
        }
    }

    fn remove(&mut self, key: &NodeKey) {
        self.nodes.retain(|n| n.key() != *key);
    }

    fn clear(&mut self) {
        self.nodes.clear();
    }
}

/// Shared, observable selection.
#[derive(Debug, Clone, Default)]
pub struct SelectedFiles {
    store: Arc<Store<Selection>>,
    mode: SelectionMode,
}

impl SelectedFiles {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            store: Arc::default(),
            mode,
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Select a node. In [`SelectionMode::Single`] any previous selection is
    /// dropped first.
    pub fn add(&self, node: Node) {
        let mode = self.mode;
        self.store.update(|s| {
            if mode == SelectionMode::Single {
                s.clear();
            }
            s.insert(node);
        });
    }

    pub fn remove(&self, key: &NodeKey) {
        self.store.update(|s| s.remove(key));
    }

    pub fn has(&self, key: &NodeKey) -> bool {
        self.store.with(|s| s.contains(key))
    }

    /// Any one selected node: the earliest one still selected.
    pub fn get_one(&self) -> Option<Node> {
        self.store.with(|s| s.first().cloned())
    }

    pub fn clear(&self) {
        self.store.update(Selection::clear);
    }

    pub fn len(&self) -> usize {
        self.store.with(Selection::len)
    }

    pub fn is_empty(&self) -> bool {
        self.store.with(Selection::is_empty)
    }

    pub fn get(&self) -> Selection {
        self.store.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<Selection> {
        self.store.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::node::tests::{file, folder};

    #[test]
    fn test_single_mode_replaces() {
        let selected = SelectedFiles::default();
        assert_eq!(selected.mode(), SelectionMode::Single);

        selected.add(folder(2, "docs", 1).into());
        selected.add(file(3, "a.txt", 1).into());
        assert_eq!(selected.len(), 1);
        assert!(selected.has(&NodeKey::file(3)));
        assert!(!selected.has(&NodeKey::folder(2)));
        assert_eq!(selected.get_one().unwrap().key(), NodeKey::file(3));
    }

    #[test]
    fn test_multi_mode_keeps_order() {
        let selected = SelectedFiles::new(SelectionMode::Multi);
        selected.add(folder(2, "docs", 1).into());
        selected.add(file(3, "a.txt", 1).into());
        selected.add(folder(2, "docs", 1).into());
        assert_eq!(selected.len(), 2);
        assert_eq!(selected.get_one().unwrap().key(), NodeKey::folder(2));

        selected.remove(&NodeKey::folder(2));
        assert_eq!(selected.get_one().unwrap().key(), NodeKey::file(3));
    }

    #[test]
    fn test_remove_and_clear() {
        let selected = SelectedFiles::default();
        assert!(selected.get_one().is_none());

        selected.add(file(3, "a.txt", 1).into());
        selected.remove(&NodeKey::folder(3));
        assert_eq!(selected.len(), 1);
        selected.remove(&NodeKey::file(3));
        assert!(selected.is_empty());

        selected.add(file(4, "b.txt", 1).into());
        selected.clear();
        assert!(selected.get().is_empty());
    }
}
