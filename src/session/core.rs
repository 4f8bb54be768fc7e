//! Session state: the API client plus the shared client state it keeps
//! consistent.

use std::sync::Arc;

use super::account::User;
use super::events::{SessionEvents, SessionReset};
use crate::api::{ApiClient, RequestOptions};
use crate::config::{ClientConfig, DEFAULT_HOME_FOLDER_NAME};
use crate::error::Result;
use crate::http::{ApiRequest, ApiResponse, HttpClient, Transport};
use crate::path::{Path, PathEntry};
use crate::state::AppState;

/// A client session against one file server.
///
/// Clones share the transport, the cookie jar and all state containers, so
/// a clone can be handed to each task issuing requests.
#[derive(Debug, Clone)]
pub struct CloudSession {
    pub(crate) api: ApiClient,
    pub(crate) state: AppState,
    home_folder_name: String,
}

impl CloudSession {
    /// Create a session over `transport`.
    ///
    /// A [`SessionReset`] handler is registered so that logout and
    /// authorization loss reset `state`.
    pub fn new(transport: Arc<dyn Transport>, state: AppState) -> Self {
        let events = SessionEvents::new();
        events.subscribe(Arc::new(SessionReset::new(state.clone())));
        Self {
            api: ApiClient::new(transport, events),
            state,
            home_folder_name: DEFAULT_HOME_FOLDER_NAME.to_string(),
        }
    }

    /// Create a session talking HTTP to the configured server.
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        let http = HttpClient::from_config(config)?;
        Ok(Self::new(Arc::new(http), AppState::default())
            .with_home_folder_name(config.home_folder_name.clone()))
    }

    /// Name shown for the personal root folder in paths.
    pub fn with_home_folder_name(mut self, name: impl Into<String>) -> Self {
        self.home_folder_name = name.into();
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Register listeners here to observe logins, logouts and session loss.
    pub fn events(&self) -> &SessionEvents {
        self.api.events()
    }

    /// Path of the user's personal root folder.
    pub fn home_path(&self, user: &User) -> Path {
        Path::root(PathEntry::new(
            user.personal_folder_id,
            self.home_folder_name.as_str(),
        ))
    }

    /// Authenticated call: a 401 ends the session.
    pub(crate) async fn call(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.api.request(request, RequestOptions::default()).await
    }
}
