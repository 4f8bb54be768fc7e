//! Download operations.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use reqwest::header::CONTENT_DISPOSITION;
use tracing::info;

use crate::error::Result;
use crate::http::ApiRequest;
use crate::session::CloudSession;

/// Name used when the server does not send one.
pub const DEFAULT_DOWNLOAD_NAME: &str = "default";

/// A downloaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContent {
    /// Name from the `Content-Disposition` header, if any.
    pub file_name: Option<String>,
    pub bytes: Bytes,
}

/// Extract the `filename` parameter of a `Content-Disposition` value.
pub fn parse_content_disposition(value: &str) -> Option<String> {
    value.split(';').map(str::trim).find_map(|param| {
        let (key, name) = param.split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("filename") {
            return None;
        }
        let name = name.trim().trim_matches('"');
        (!name.is_empty()).then(|| name.to_string())
    })
}

/// File name safe to join onto a directory: only the last component of
/// whatever the server sent.
fn local_file_name(name: Option<&str>) -> String {
    name.and_then(|n| Path::new(n).file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_DOWNLOAD_NAME.to_string())
}

impl CloudSession {
    /// Fetch the content of a file.
    pub async fn file_content(&self, id: i64) -> Result<FileContent> {
        let response = self
            .call(ApiRequest::get("/api/file/download").query("id", id))
            .await?;
        let file_name = response
            .header(CONTENT_DISPOSITION.as_str())
            .and_then(parse_content_disposition);
        Ok(FileContent {
            file_name,
            bytes: response.body,
        })
    }

    /// Download a file into `dir` and return where it was written.
    pub async fn download_file<P: AsRef<Path>>(&self, id: i64, dir: P) -> Result<PathBuf> {
        let content = self.file_content(id).await?;
        let target = dir
            .as_ref()
            .join(local_file_name(content.file_name.as_deref()));
        tokio::fs::write(&target, &content.bytes).await?;
        info!(id, path = %target.display(), size = content.bytes.len(), "downloaded file");
        Ok(target)
    }
}
