//! Authentication: signup, login, logout and identity.

use serde_json::json;
use tracing::debug;

use super::account::User;
use super::core::CloudSession;
use super::events::SessionEvent;
use crate::api::RequestOptions;
use crate::error::Result;
use crate::http::ApiRequest;

impl CloudSession {
    /// Create an account and start a session for it.
    ///
    /// A 401 here is a plain failure, not a lost session.
    pub async fn signup(&self, username: &str, email: &str, password: &str) -> Result<User> {
        let request = ApiRequest::post("/api/signup").json(json!({
            "username": username,
            "email": email,
            "password": password,
        }));
        self.api
            .request(request, RequestOptions::credentials())
            .await?;
        self.load_session().await
    }

    /// Log in and open the user's home folder.
    ///
    /// Wrong credentials come back as [`CloudError::Api`] with the server's
    /// message; account and history are left as they were.
    ///
    /// [`CloudError::Api`]: crate::error::CloudError::Api
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let request = ApiRequest::post("/api/login").json(json!({
            "email": email,
            "password": password,
        }));
        self.api
            .request(request, RequestOptions::credentials())
            .await?;
        self.load_session().await
    }

    /// Fetch the identity, store it and start history over at the home
    /// folder.
    pub async fn load_session(&self) -> Result<User> {
        let user = self.me().await?;
        self.state.account.login(user.clone());
        self.state.history.replace(&self.home_path(&user));
        self.events().emit(&SessionEvent::LoggedIn(user.clone()));
        Ok(user)
    }

    /// Current identity according to the server.
    pub async fn me(&self) -> Result<User> {
        let response = self
            .api
            .request(ApiRequest::get("/api/me"), RequestOptions::credentials())
            .await?;
        response.json()
    }

    /// End the session.
    ///
    /// Client state is reset whatever the server answers; the server's
    /// result is returned afterwards.
    pub async fn logout(&self) -> Result<()> {
        let remote = self
            .api
            .request(ApiRequest::post("/api/logout"), RequestOptions::credentials())
            .await;
        if let Err(e) = &remote {
            debug!("logout request failed: {}", e);
        }
        self.events().emit(&SessionEvent::LoggedOut);
        remote.map(|_| ())
    }

    /// Delete the account, then log out.
    pub async fn delete_me(&self) -> Result<()> {
        self.call(ApiRequest::delete("/api/me")).await?;
        self.logout().await
    }
}
