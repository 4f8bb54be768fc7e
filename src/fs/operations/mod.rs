//! File and folder operations, split into focused modules.

mod browse;
mod dir_ops;
mod download;
mod upload;

pub use download::{DEFAULT_DOWNLOAD_NAME, FileContent, parse_content_disposition};
