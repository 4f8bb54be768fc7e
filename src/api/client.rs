//! API client: the single path every remote call takes.

use std::sync::Arc;

use tracing::{debug, warn};

use super::error::{ResponseClass, api_error, classify_status};
use crate::error::{CloudError, Result};
use crate::http::{ApiRequest, ApiResponse, Transport};
use crate::session::{SessionEvent, SessionEvents};

/// Per-call behavior of [`ApiClient::request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestOptions {
    /// Treat 401 as a lost session. Login, signup and the identity check
    /// turn this off: for them 401 means bad credentials.
    pub logout_on_unauthorized: bool,
}

impl RequestOptions {
    /// Options for calls where 401 is an ordinary failure.
    pub fn credentials() -> Self {
        Self {
            logout_on_unauthorized: false,
        }
    }
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            logout_on_unauthorized: true,
        }
    }
}

/// File server API client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    events: SessionEvents,
}

impl ApiClient {
    /// Create a client; authorization loss is reported through `events`.
    pub fn new(transport: Arc<dyn Transport>, events: SessionEvents) -> Self {
        Self { transport, events }
    }

    pub fn events(&self) -> &SessionEvents {
        &self.events
    }

    /// Make an API request.
    ///
    /// Success statuses return the response for the caller to decode. A
    /// rejected session notifies listeners of
    /// [`SessionEvent::AuthorizationLost`] before returning
    /// [`CloudError::Unauthorized`]. Other failures carry the server's
    /// message. Nothing is retried.
    pub async fn request(
        &self,
        request: ApiRequest,
        options: RequestOptions,
    ) -> Result<ApiResponse> {
        let method = request.method.clone();
        let path = request.path.clone();

        let response = self.transport.send(request).await?;
        debug!(%method, %path, status = response.status.as_u16(), "api response");

        match classify_status(response.status, options.logout_on_unauthorized) {
            ResponseClass::Success => Ok(response),
            ResponseClass::AuthorizationLost => {
                warn!(%method, %path, "authorization lost");
                self.events.emit(&SessionEvent::AuthorizationLost);
                Err(CloudError::Unauthorized)
            }
            ResponseClass::Failure => Err(api_error(&response)),
        }
    }
}
