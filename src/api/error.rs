//! Response classification and server error bodies.

use reqwest::StatusCode;
use serde::Deserialize;
use tracing::warn;

use crate::error::{CloudError, FALLBACK_MESSAGE};
use crate::http::ApiResponse;

/// Error body sent by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// What a response status means to the request layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseClass {
    Success,
    /// The session was rejected and must be torn down.
    AuthorizationLost,
    /// Any other failure, reported with the server's message.
    Failure,
}

/// Classify a status. A 401 only counts as a lost session when the call
/// did not opt out of forced logout.
pub fn classify_status(status: StatusCode, logout_on_unauthorized: bool) -> ResponseClass {
    if status.is_success() {
        ResponseClass::Success
    } else if status == StatusCode::UNAUTHORIZED && logout_on_unauthorized {
        ResponseClass::AuthorizationLost
    } else {
        ResponseClass::Failure
    }
}

/// Build the error for a failed response from its `{message}` body.
pub fn api_error(response: &ApiResponse) -> CloudError {
    let message = match serde_json::from_slice::<ErrorResponse>(&response.body) {
        Ok(body) => body.message,
        Err(e) => {
            warn!(status = response.status.as_u16(), error = %e, "unreadable error body");
            FALLBACK_MESSAGE.to_string()
        }
    };
    CloudError::Api {
        status: response.status.as_u16(),
        message,
    }
}
