//! In-memory transport replaying queued responses.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

use super::{ApiRequest, ApiResponse, Transport};
use crate::error::{CloudError, Result};

#[derive(Debug, Default)]
pub(crate) struct FakeTransport {
    responses: Mutex<VecDeque<ApiResponse>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&self, status: u16, headers: &[(&'static str, &str)], body: Bytes) {
        let mut map = HeaderMap::new();
        for (name, value) in headers {
            map.insert(
                HeaderName::from_static(name),
                HeaderValue::from_bytes(value.as_bytes()).unwrap(),
            );
        }
        self.responses.lock().unwrap().push_back(ApiResponse {
            status: StatusCode::from_u16(status).unwrap(),
            headers: map,
            body,
        });
    }

    pub(crate) fn push_json(&self, status: u16, body: Value) {
        self.push(
            status,
            &[("content-type", "application/json")],
            Bytes::from(body.to_string()),
        );
    }

    pub(crate) fn push_empty(&self, status: u16) {
        self.push(status, &[], Bytes::new());
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn last_request(&self) -> ApiRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| CloudError::Custom("no queued response".to_string()))
    }
}
