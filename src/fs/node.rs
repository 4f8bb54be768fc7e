//! File and folder types as returned by the server.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::error::{CloudError, Result};

/// Content type of a file, as detected by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FileType {
    Text,
    Image,
    /// Missing or unrecognized type tag.
    #[default]
    Unknown,
}

impl FileType {
    /// Map the server's type tag.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("Text") => FileType::Text,
            Some("Image") => FileType::Image,
            _ => FileType::Unknown,
        }
    }
}

/// Whether a node is a file or a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    File,
    Folder,
}

impl NodeKind {
    /// Path segment used by the per-kind endpoints (`/api/{file|folder}/...`).
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::File => "file",
            NodeKind::Folder => "folder",
        }
    }
}

/// Identity of a node. Ids are only unique within one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKey {
    pub kind: NodeKind,
    pub id: i64,
}

impl NodeKey {
    pub fn file(id: i64) -> Self {
        Self {
            kind: NodeKind::File,
            id,
        }
    }

    pub fn folder(id: i64) -> Self {
        Self {
            kind: NodeKind::Folder,
            id,
        }
    }
}

/// Display name and extension split from a raw file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameParts {
    pub display_name: String,
    pub extension: Option<String>,
}

/// Split a raw name at its last `.`.
///
/// `"report.final.pdf"` gives `("report.final", Some("pdf"))`; a name
/// without any `.` is all display name.
pub fn derive_name_parts(raw: &str) -> NameParts {
    match raw.rsplit_once('.') {
        Some((display_name, extension)) => NameParts {
            display_name: display_name.to_string(),
            extension: Some(extension.to_string()),
        },
        None => NameParts {
            display_name: raw.to_string(),
            extension: None,
        },
    }
}

/// Order names the way people expect: digit runs compare by value.
///
/// `"file2"` sorts before `"file10"`. Letters compare case-insensitively,
/// with the raw names as a final tie-break.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let ln = take_digits(&mut left);
                let rn = take_digits(&mut right);
                let ord = ln
                    .trim_start_matches('0')
                    .len()
                    .cmp(&rn.trim_start_matches('0').len())
                    .then_with(|| ln.trim_start_matches('0').cmp(rn.trim_start_matches('0')));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(l), Some(r)) => {
                let ord = l.to_lowercase().cmp(r.to_lowercase());
                if ord != Ordering::Equal {
                    return ord;
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(c) = chars.next_if(|c| c.is_ascii_digit()) {
        digits.push(c);
    }
    digits
}

/// Timestamps arrive either as epoch seconds or as text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawTimestamp {
    Epoch(i64),
    Text(String),
}

impl RawTimestamp {
    /// Normalize to Unix epoch seconds (UTC).
    pub(crate) fn to_epoch(&self) -> Result<i64> {
        match self {
            RawTimestamp::Epoch(secs) => Ok(*secs),
            RawTimestamp::Text(text) => parse_timestamp(text),
        }
    }
}

fn parse_timestamp(text: &str) -> Result<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.timestamp());
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|dt| dt.and_utc().timestamp())
        .ok_or_else(|| CloudError::InvalidResponse(format!("invalid timestamp: {}", text)))
}

/// File record as sent by `/api/view`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FileRecord {
    pub id: i64,
    pub name: String,
    pub file_type: Option<String>,
    pub size: u64,
    pub last_modified: RawTimestamp,
    pub starred: bool,
    pub owner_id: i64,
    pub parent_id: i64,
}

/// Folder record as sent by `/api/view`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FolderRecord {
    pub id: i64,
    pub name: String,
    pub last_modified: RawTimestamp,
    pub starred: bool,
    pub owner_id: i64,
    pub parent_id: i64,
}

/// A file on the server.
///
/// Built only from server responses and never modified; fetch again to see
/// changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    id: i64,
    name: String,
    display_name: String,
    extension: Option<String>,
    file_type: FileType,
    size: u64,
    last_modified: i64,
    starred: bool,
    owner_id: i64,
    parent_id: i64,
}

impl File {
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Raw name including the extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name without the extension.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Last modification as Unix epoch seconds.
    pub fn last_modified(&self) -> i64 {
        self.last_modified
    }

    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.last_modified, 0)
    }

    pub fn starred(&self) -> bool {
        self.starred
    }

    pub fn owner_id(&self) -> i64 {
        self.owner_id
    }

    pub fn parent_id(&self) -> i64 {
        self.parent_id
    }

    pub fn key(&self) -> NodeKey {
        NodeKey::file(self.id)
    }
}

impl TryFrom<FileRecord> for File {
    type Error = CloudError;

    fn try_from(record: FileRecord) -> Result<Self> {
        let NameParts {
            display_name,
            extension,
        } = derive_name_parts(&record.name);
        Ok(Self {
            id: record.id,
            display_name,
            extension,
            file_type: FileType::from_tag(record.file_type.as_deref()),
            size: record.size,
            last_modified: record.last_modified.to_epoch()?,
            starred: record.starred,
            owner_id: record.owner_id,
            parent_id: record.parent_id,
            name: record.name,
        })
    }
}

/// A folder on the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    id: i64,
    name: String,
    last_modified: i64,
    starred: bool,
    owner_id: i64,
    parent_id: i64,
}

impl Folder {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Folders have no extension; this is the full name.
    pub fn display_name(&self) -> &str {
        &self.name
    }

    /// Last modification as Unix epoch seconds.
    pub fn last_modified(&self) -> i64 {
        self.last_modified
    }

    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.last_modified, 0)
    }

    pub fn starred(&self) -> bool {
        self.starred
    }

    pub fn owner_id(&self) -> i64 {
        self.owner_id
    }

    pub fn parent_id(&self) -> i64 {
        self.parent_id
    }

    pub fn key(&self) -> NodeKey {
        NodeKey::folder(self.id)
    }
}

impl TryFrom<FolderRecord> for Folder {
    type Error = CloudError;

    fn try_from(record: FolderRecord) -> Result<Self> {
        Ok(Self {
            id: record.id,
            last_modified: record.last_modified.to_epoch()?,
            starred: record.starred,
            owner_id: record.owner_id,
            parent_id: record.parent_id,
            name: record.name,
        })
    }
}

/// Either a file or a folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    File(File),
    Folder(Folder),
}

impl Node {
    pub fn key(&self) -> NodeKey {
        match self {
            Node::File(f) => f.key(),
            Node::Folder(f) => f.key(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.key().kind
    }

    pub fn id(&self) -> i64 {
        self.key().id
    }

    pub fn name(&self) -> &str {
        match self {
            Node::File(f) => f.name(),
            Node::Folder(f) => f.name(),
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Node::File(f) => f.display_name(),
            Node::Folder(f) => f.display_name(),
        }
    }

    pub fn parent_id(&self) -> i64 {
        match self {
            Node::File(f) => f.parent_id(),
            Node::Folder(f) => f.parent_id(),
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Node::File(_))
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Node::Folder(_))
    }
}

impl From<File> for Node {
    fn from(file: File) -> Self {
        Node::File(file)
    }
}

impl From<Folder> for Node {
    fn from(folder: Folder) -> Self {
        Node::Folder(folder)
    }
}

/// Contents of a folder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub files: Vec<File>,
    pub folders: Vec<Folder>,
}

impl Listing {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.folders.is_empty()
    }

    /// Folders first, then files, each group in natural name order.
    pub fn sorted_nodes(&self) -> Vec<Node> {
        let mut folders = self.folders.clone();
        folders.sort_by(|a, b| natural_cmp(a.name(), b.name()));
        let mut files = self.files.clone();
        files.sort_by(|a, b| natural_cmp(a.name(), b.name()));
        folders
            .into_iter()
            .map(Node::from)
            .chain(files.into_iter().map(Node::from))
            .collect()
    }
}
