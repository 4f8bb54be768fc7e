//! Folder creation and node mutation.

use serde_json::json;
use tracing::debug;

use crate::error::Result;
use crate::fs::node::{Node, NodeKey};
use crate::http::ApiRequest;
use crate::session::CloudSession;

impl CloudSession {
    /// Create a folder named `name` inside `parent_id`.
    pub async fn new_folder(&self, parent_id: i64, name: &str) -> Result<()> {
        let request = ApiRequest::post("/api/folder/new").json(json!({
            "parentId": parent_id,
            "name": name,
        }));
        self.call(request).await?;
        Ok(())
    }

    /// Rename a file or folder.
    pub async fn rename(&self, node: NodeKey, new_name: &str) -> Result<()> {
        let request = ApiRequest::patch(format!("/api/{}/rename", node.kind.as_str())).json(
            json!({
                "id": node.id,
                "newName": new_name,
            }),
        );
        self.call(request).await?;
        Ok(())
    }

    /// Move a file or folder into `folder_id`.
    pub async fn move_node(&self, node: NodeKey, folder_id: i64) -> Result<()> {
        let request = ApiRequest::patch(format!("/api/{}/move", node.kind.as_str())).json(
            json!({
                "id": node.id,
                "folderId": folder_id,
            }),
        );
        self.call(request).await?;
        Ok(())
    }

    /// Move the pending node into `folder_id` and clear the pending move.
    ///
    /// Returns the moved node, or `None` if nothing was pending. On failure
    /// the move stays pending.
    pub async fn complete_move(&self, folder_id: i64) -> Result<Option<Node>> {
        let Some(node) = self.state.file_move.get() else {
            return Ok(None);
        };
        self.move_node(node.key(), folder_id).await?;
        self.state.file_move.cancel();
        debug!(id = node.id(), folder_id, "moved node");
        Ok(Some(node))
    }

    /// Delete a file or folder.
    ///
    /// `preserve_parent` is only meaningful for folders; it is always sent.
    pub async fn delete(&self, node: NodeKey, preserve_parent: bool) -> Result<()> {
        let request = ApiRequest::delete(format!("/api/{}/delete", node.kind.as_str()))
            .query("id", node.id)
            .query("preserve-parent", preserve_parent);
        self.call(request).await?;
        Ok(())
    }

    /// Copy a file next to itself.
    pub async fn duplicate_file(&self, id: i64) -> Result<()> {
        let request = ApiRequest::post("/api/file/duplicate").json(json!({ "id": id }));
        self.call(request).await?;
        Ok(())
    }
}
