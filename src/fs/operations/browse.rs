//! Folder listing and navigation.

use serde::Deserialize;
use tracing::debug;

use crate::error::{CloudError, Result};
use crate::fs::node::{File, FileRecord, Folder, FolderRecord, Listing};
use crate::http::ApiRequest;
use crate::path::{Path, PathEntry};
use crate::session::CloudSession;

#[derive(Debug, Deserialize)]
struct ViewResponse {
    #[serde(default)]
    files: Vec<FileRecord>,
    #[serde(default)]
    folders: Vec<FolderRecord>,
}

#[derive(Debug, Deserialize)]
struct FolderSizeResponse {
    size: u64,
}

impl CloudSession {
    /// List the children of a folder.
    ///
    /// With `folders_only` the server leaves files out, which is what a
    /// move-destination picker wants.
    pub async fn view(&self, parent_id: i64, folders_only: bool) -> Result<Listing> {
        let request = ApiRequest::get("/api/view")
            .query("parent-folder-id", parent_id)
            .query("folders-only", folders_only);
        let response: ViewResponse = self.call(request).await?.json()?;

        let files = response
            .files
            .into_iter()
            .map(File::try_from)
            .collect::<Result<Vec<_>>>()?;
        let folders = response
            .folders
            .into_iter()
            .map(Folder::try_from)
            .collect::<Result<Vec<_>>>()?;
        debug!(
            parent_id,
            files = files.len(),
            folders = folders.len(),
            "listed folder"
        );
        Ok(Listing { files, folders })
    }

    /// Total size in bytes of everything below a folder.
    ///
    /// `filter` is passed through to the server unchanged.
    pub async fn folder_size(&self, id: i64, filter: Option<&str>) -> Result<u64> {
        let mut request = ApiRequest::get("/api/folder/size").query("id", id);
        if let Some(filter) = filter {
            request = request.query("filter", filter);
        }
        let response: FolderSizeResponse = self.call(request).await?.json()?;
        Ok(response.size)
    }

    /// List the folder at `path` and make it the current history entry.
    ///
    /// History only moves once the listing has arrived.
    pub async fn open(&self, path: &Path) -> Result<Listing> {
        let folder_id = path
            .folder_id()
            .ok_or_else(|| CloudError::Custom("cannot open an empty path".to_string()))?;
        let listing = self.view(folder_id, false).await?;
        self.state.history.push(path);
        Ok(listing)
    }

    /// Open a sub folder of the current folder.
    ///
    /// Fails without a request when no folder is open, since the
    /// breadcrumb would have no root.
    pub async fn enter(&self, folder: &Folder) -> Result<Listing> {
        let mut path = self
            .state
            .history
            .current_path()
            .ok_or_else(|| CloudError::Custom("no folder is open".to_string()))?;
        path.add_sub_folder(PathEntry::new(folder.id(), folder.name()));
        self.open(&path).await
    }

    /// List the current folder again.
    ///
    /// Returns `None` when no folder is open.
    pub async fn reload(&self) -> Result<Option<Listing>> {
        let Some(path) = self.state.history.current_path() else {
            return Ok(None);
        };
        let folder_id = path
            .folder_id()
            .ok_or_else(|| CloudError::Custom("cannot open an empty path".to_string()))?;
        let listing = self.view(folder_id, false).await?;
        self.state.history.refresh();
        Ok(Some(listing))
    }
}

#[cfg(test)]
mod tests {
    use crate::error::CloudError;
    use crate::fs::node::FileType;
    use crate::path::{Path, PathEntry};
    use crate::session::account::tests::user;
    use crate::session::core::tests::session;
    use crate::state::ModalState;
    use crate::fs::node::tests::{file, folder};
    use crate::session::SessionEvent;
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use tokio::sync::watch;
    use tokio::task::JoinHandle;

    fn record_change<T: Send + Sync + 'static>(
        name: &'static str,
        mut rx: watch::Receiver<T>,
        order: Arc<Mutex<Vec<&'static str>>>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            rx.borrow_and_update();
            rx.changed().await.unwrap();
            order.lock().unwrap().push(name);
        })
    }

    fn listing_json() -> serde_json::Value {
        json!({
            "files": [{
                "id": 5,
                "name": "notes.txt",
                "fileType": "Text",
                "size": 42,
                "lastModified": "2024-01-02 03:04:05",
                "starred": false,
                "ownerId": 1,
                "parentId": 10,
            }],
            "folders": [{
                "id": 20,
                "name": "Photos",
                "lastModified": 1_700_000_000,
                "starred": true,
                "ownerId": 1,
                "parentId": 10,
            }],
        })
    }

    fn home() -> Path {
        Path::root(PathEntry::new(10, "My Cloud"))
    }

    #[tokio::test]
    async fn test_view_builds_listing() {
        let (transport, session) = session();
        transport.push_json(200, listing_json());

        let listing = session.view(10, false).await.unwrap();
        let request = transport.last_request();
        assert_eq!(request.path, "/api/view");
        assert_eq!(request.query_value("parent-folder-id"), Some("10"));
        assert_eq!(request.query_value("folders-only"), Some("false"));

        assert_eq!(listing.files.len(), 1);
        let notes = &listing.files[0];
        assert_eq!(notes.display_name(), "notes");
        assert_eq!(notes.extension(), Some("txt"));
        assert_eq!(notes.file_type(), FileType::Text);
        assert_eq!(notes.last_modified(), 1_704_164_645);
        assert_eq!(listing.folders[0].name(), "Photos");
        assert!(listing.folders[0].starred());
    }

    #[tokio::test]
    async fn test_view_folders_only() {
        let (transport, session) = session();
        transport.push_json(200, json!({ "folders": [] }));

        let listing = session.view(10, true).await.unwrap();
        assert!(listing.is_empty());
        assert_eq!(transport.last_request().query_value("folders-only"), Some("true"));
    }

    #[tokio::test]
    async fn test_view_bad_timestamp() {
        let (transport, session) = session();
        let mut body = listing_json();
        body["files"][0]["lastModified"] = json!("yesterday");
        transport.push_json(200, body);

        let err = session.view(10, false).await.unwrap_err();
        assert!(matches!(err, CloudError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_view_unauthorized_resets_session() {
        let (transport, session) = session();
        let state = session.state();
        state.account.login(user());
        state.history.push(&home());
        state.modal.set(ModalState::TextInput);
        state.file_move.set(file(5, "notes.txt", 10).into());
        transport.push_json(401, json!({ "message": "expired" }));

        let err = session.view(10, false).await.unwrap_err();
        assert!(matches!(err, CloudError::Unauthorized));
        assert!(!state.account.is_logged_in());
        let history = state.history.get();
        assert_eq!(history.len(), 1);
        assert_eq!(history.index(), 0);
        assert!(history.current().is_none());
        assert!(!state.modal.is_open());
        assert!(!state.file_move.is_pending());
    }

    #[tokio::test]
    async fn test_view_unauthorized_reset_order() {
        let (transport, session) = session();
        let state = session.state().clone();
        state.account.login(user());
        state.history.push(&home());
        state.modal.set(ModalState::TextInput);

        // Woken in notification order on the current-thread runtime.
        let order = Arc::new(Mutex::new(Vec::new()));
        let watchers = vec![
            record_change("modal", state.modal.subscribe(), order.clone()),
            record_change("account", state.account.subscribe(), order.clone()),
            record_change("history", state.history.subscribe(), order.clone()),
        ];
        for _ in 0..3 {
            tokio::task::yield_now().await;
        }

        // Runs after the reset handler, inside the failing call.
        let snapshot = Arc::new(Mutex::new(None));
        let sink = snapshot.clone();
        let observed = state.clone();
        session.events().subscribe(Arc::new(move |e: &SessionEvent| {
            if *e == SessionEvent::AuthorizationLost {
                *sink.lock().unwrap() = Some((
                    observed.modal.is_open(),
                    observed.account.is_logged_in(),
                    observed.history.current_path(),
                ));
            }
        }));

        transport.push_json(401, json!({ "message": "expired" }));
        let result = session.view(10, false).await;
        assert_eq!(*snapshot.lock().unwrap(), Some((false, false, None)));
        assert!(matches!(result, Err(CloudError::Unauthorized)));

        for watcher in watchers {
            watcher.await.unwrap();
        }
        assert_eq!(*order.lock().unwrap(), ["modal", "account", "history"]);
    }

    #[tokio::test]
    async fn test_folder_size() {
        let (transport, session) = session();
        transport.push_json(200, json!({ "size": 4096 }));
        transport.push_json(200, json!({ "size": 12 }));

        assert_eq!(session.folder_size(10, None).await.unwrap(), 4096);
        assert_eq!(transport.last_request().query_value("filter"), None);

        assert_eq!(session.folder_size(10, Some("image")).await.unwrap(), 12);
        let request = transport.last_request();
        assert_eq!(request.path, "/api/folder/size");
        assert_eq!(request.query_value("id"), Some("10"));
        assert_eq!(request.query_value("filter"), Some("image"));
    }

    #[tokio::test]
    async fn test_open_pushes_history() {
        let (transport, session) = session();
        transport.push_json(200, listing_json());
        transport.push_json(200, json!({ "files": [], "folders": [] }));

        session.open(&home()).await.unwrap();
        assert_eq!(session.state().history.current_path(), Some(home()));

        let photos = folder(20, "Photos", 10);
        session.enter(&photos).await.unwrap();
        let current = session.state().history.current_path().unwrap();
        assert_eq!(current.to_string(), "/My Cloud/Photos");
        assert_eq!(transport.last_request().query_value("parent-folder-id"), Some("20"));
        assert!(session.state().history.can_go_back());
    }

    #[tokio::test]
    async fn test_open_failure_keeps_history() {
        let (transport, session) = session();
        transport.push_json(404, json!({ "message": "Folder not found" }));

        let err = session.open(&home()).await.unwrap_err();
        assert_eq!(err.user_message(), "Folder not found");
        assert!(session.state().history.current_path().is_none());
    }

    #[tokio::test]
    async fn test_enter_without_open_folder() {
        let (transport, session) = session();
        let err = session.enter(&folder(20, "Photos", 10)).await.unwrap_err();
        assert!(matches!(err, CloudError::Custom(_)));
        assert!(transport.requests().is_empty());
        assert!(session.state().history.current_path().is_none());
    }

    #[tokio::test]
    async fn test_open_empty_path() {
        let (transport, session) = session();
        let err = session.open(&Path::new()).await.unwrap_err();
        assert!(matches!(err, CloudError::Custom(_)));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_reload() {
        let (transport, session) = session();
        assert!(session.reload().await.unwrap().is_none());

        session.state().history.push(&home());
        let mut rx = session.state().history.subscribe();
        rx.borrow_and_update();
        transport.push_json(200, listing_json());

        let listing = session.reload().await.unwrap().unwrap();
        assert_eq!(listing.files.len(), 1);
        assert!(rx.has_changed().unwrap());
        assert_eq!(session.state().history.get().len(), 2);
    }
}
