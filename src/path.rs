//! Folder paths as breadcrumbs of `{id, name}` entries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One folder in a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathEntry {
    /// Folder id on the server.
    pub id: i64,
    /// Folder name, used for display only.
    pub name: String,
}

impl PathEntry {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Location of a folder, ordered from the root to the folder itself.
///
/// Two paths are equal when they have the same length and the same ids at
/// every position; names never take part in comparisons.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Path {
    entries: Vec<PathEntry>,
}

impl Path {
    /// Create an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a path holding only a root folder.
    pub fn root(entry: PathEntry) -> Self {
        Self {
            entries: vec![entry],
        }
    }

    /// Create a path from root-to-leaf entries.
    pub fn from_entries(entries: impl IntoIterator<Item = PathEntry>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Entries from root to leaf.
    pub fn entries(&self) -> &[PathEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The folder this path points at.
    pub fn last(&self) -> Option<&PathEntry> {
        self.entries.last()
    }

    /// Id of the folder this path points at.
    pub fn folder_id(&self) -> Option<i64> {
        self.last().map(|e| e.id)
    }

    /// A copy of this path without its last entry.
    pub fn parent(&self) -> Option<Path> {
        let (_, rest) = self.entries.split_last()?;
        Some(Path::from_entries(rest.iter().cloned()))
    }

    /// Append a subfolder in place.
    ///
    /// Paths stored elsewhere (e.g. in history) are copies, so this never
    /// alters them; clone first to keep the original.
    pub fn add_sub_folder(&mut self, entry: PathEntry) {
        self.entries.push(entry);
    }

    /// Check whether `other` is this path or one of its ancestors.
    ///
    /// Returns false when `other` is longer; otherwise true iff every id of
    /// `other` matches this path's id at the same position.
    pub fn contains(&self, other: &Path) -> bool {
        if other.len() > self.len() {
            return false;
        }
        other
            .entries
            .iter()
            .zip(&self.entries)
            .all(|(a, b)| a.id == b.id)
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.contains(other)
    }
}

impl Eq for Path {}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return f.write_str("/");
        }
        for entry in &self.entries {
            write!(f, "/{}", entry.name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(ids: &[i64]) -> Path {
        Path::from_entries(ids.iter().map(|id| PathEntry::new(*id, format!("f{}", id))))
    }

    #[test]
    fn test_contains_prefix() {
        let a = path(&[1, 2, 3]);
        assert!(a.contains(&path(&[1])));
        assert!(a.contains(&path(&[1, 2])));
        assert!(a.contains(&path(&[1, 2, 3])));
        assert!(a.contains(&Path::new()));
        assert!(!a.contains(&path(&[1, 3])));
        assert!(!a.contains(&path(&[2])));
    }

    #[test]
    fn test_contains_longer_is_false() {
        let a = path(&[1, 2]);
        assert!(!a.contains(&path(&[1, 2, 3])));
        assert!(!Path::new().contains(&path(&[1])));
    }

    #[test]
    fn test_equality_ignores_names() {
        let a = Path::from_entries([PathEntry::new(1, "My Cloud"), PathEntry::new(5, "docs")]);
        let b = Path::from_entries([PathEntry::new(1, "Root"), PathEntry::new(5, "renamed")]);
        assert_eq!(a, b);
        assert_ne!(a, path(&[1]));
        assert_ne!(a, path(&[1, 6]));
    }

    #[test]
    fn test_clone_is_independent() {
        let a = path(&[1, 2]);
        let mut b = a.clone();
        assert_eq!(a, b);

        b.add_sub_folder(PathEntry::new(3, "f3"));
        assert_eq!(a.len(), 2);
        assert_eq!(b.len(), 3);
        assert_ne!(a, b);
        assert!(b.contains(&a));
    }

    #[test]
    fn test_display_uses_names() {
        let a = Path::from_entries([PathEntry::new(1, "My Cloud"), PathEntry::new(9, "photos")]);
        assert_eq!(a.to_string(), "/My Cloud/photos");
        assert_eq!(Path::new().to_string(), "/");
    }

    #[test]
    fn test_parent_and_folder_id() {
        let a = path(&[1, 2, 3]);
        assert_eq!(a.folder_id(), Some(3));
        assert_eq!(a.parent(), Some(path(&[1, 2])));
        assert_eq!(Path::root(PathEntry::new(1, "r")).parent(), Some(Path::new()));
        assert_eq!(Path::new().parent(), None);
        assert_eq!(Path::new().folder_id(), None);
    }
}
