//! Files, folders and the operations on them.

pub(crate) mod node;
mod operations;

pub use node::{
    File, FileType, Folder, Listing, NameParts, Node, NodeKey, NodeKind, derive_name_parts,
    natural_cmp,
};
pub use operations::{DEFAULT_DOWNLOAD_NAME, FileContent, parse_content_disposition};
