//! Upload operations.

use std::path::Path;

use bytes::Bytes;
use tracing::{debug, info};

use crate::error::{CloudError, Result};
use crate::http::{ApiRequest, MultipartForm};
use crate::session::CloudSession;

impl CloudSession {
    /// Upload `data` as a file called `name` into `parent_id`.
    pub async fn upload(
        &self,
        name: &str,
        data: impl Into<Bytes>,
        parent_id: i64,
    ) -> Result<()> {
        let data = data.into();
        let size = data.len();
        let form = MultipartForm::new()
            .file("file", name, data)
            .text("parent", parent_id.to_string());
        self.call(ApiRequest::post("/api/upload").multipart(form)).await?;
        info!(name, size, parent_id, "uploaded file");
        Ok(())
    }

    /// Upload a local file, keeping its file name.
    pub async fn upload_file<P: AsRef<Path>>(&self, local_path: P, parent_id: i64) -> Result<()> {
        let local_path = local_path.as_ref();
        let name = local_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                CloudError::Custom(format!("not a file path: {}", local_path.display()))
            })?;
        let data = tokio::fs::read(local_path).await?;
        debug!(path = %local_path.display(), "read local file");
        self.upload(&name, data, parent_id).await
    }
}
