//! HTTP transport for API requests.
//!
//! [`Transport`] is the seam between the request layer and the network:
//! [`HttpClient`] sends requests with reqwest, tests swap in a fake.

#[cfg(test)]
pub(crate) mod fake;

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::trace;

use crate::config::ClientConfig;
use crate::error::{CloudError, Result};

/// Body of an outgoing request.
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// Serialized to JSON text and sent as `application/json`.
    Json(Value),
    /// Passed through as `multipart/form-data`.
    Multipart(MultipartForm),
}

/// A multipart form kept in an inspectable shape until it is sent.
#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    parts: Vec<(String, FormPart)>,
}

/// A single multipart field.
#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    /// Plain text field.
    Text(String),
    /// File field with its name and content.
    File { file_name: String, data: Bytes },
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push((name.into(), FormPart::Text(value.into())));
        self
    }

    /// Append a file field.
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        self.parts.push((
            name.into(),
            FormPart::File {
                file_name: file_name.into(),
                data: data.into(),
            },
        ));
        self
    }

    /// Fields in insertion order.
    pub fn parts(&self) -> &[(String, FormPart)] {
        &self.parts
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&FormPart> {
        self.parts.iter().find(|(n, _)| n == name).map(|(_, p)| p)
    }

    fn into_reqwest(self) -> reqwest::multipart::Form {
        self.parts
            .into_iter()
            .fold(reqwest::multipart::Form::new(), |form, (name, part)| match part {
                FormPart::Text(value) => form.text(name, value),
                FormPart::File { file_name, data } => form.part(
                    name,
                    reqwest::multipart::Part::bytes(data.to_vec()).file_name(file_name),
                ),
            })
    }
}

/// An API request relative to the server origin.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Endpoint path, e.g. `/api/view`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Add a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Attach a JSON body.
    pub fn json(mut self, body: Value) -> Self {
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.body = RequestBody::Json(body);
        self
    }

    /// Attach a multipart body. The transport sets the boundary header.
    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    /// Value of a query parameter, if set.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A fully buffered response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl ApiResponse {
    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Header value as text, if present and valid UTF-8.
    ///
    /// The server writes file names into headers unescaped, so non-ASCII
    /// bytes are decoded as UTF-8 rather than rejected.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|v| std::str::from_utf8(v.as_bytes()).ok())
    }
}

/// Sends API requests.
#[async_trait]
pub trait Transport: fmt::Debug + Send + Sync {
    /// Send a request and buffer the response. Only transport failures are
    /// errors; any status code is a successful send.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// HTTP client for making requests to the file server.
///
/// The session cookie set by login/signup is kept in the client's cookie
/// store and sent with every later request.
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
}

impl HttpClient {
    /// Create a new HTTP client for the given server.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::from_config(&ClientConfig::new(base_url))
    }

    /// Create a new HTTP client with a proxy.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn with_proxy(base_url: &str, proxy: &str) -> Result<Self> {
        let config = ClientConfig {
            proxy: Some(proxy.to_string()),
            ..ClientConfig::new(base_url)
        };
        Self::from_config(&config)
    }

    /// Create a client from configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let base_url = parse_base_url(&config.base_url)?;

        let mut builder = Client::builder()
            .cookie_store(true)
            .user_agent(config.user_agent.as_str());
        if let Some(proxy) = &config.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy)?);
        }
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    /// Server origin requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| CloudError::InvalidUrl(format!("{}: {}", path, e)))
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = self.endpoint(&request.path)?;
        trace!(method = %request.method, %url, "sending request");

        let mut builder = self
            .client
            .request(request.method, url)
            .headers(request.headers);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.body(serde_json::to_vec(&value)?),
            RequestBody::Multipart(form) => builder.multipart(form.into_reqwest()),
        };

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}

/// Parse the server origin, making sure relative joins keep its path.
fn parse_base_url(base_url: &str) -> Result<Url> {
    let mut url =
        Url::parse(base_url).map_err(|e| CloudError::InvalidUrl(format!("{}: {}", base_url, e)))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
