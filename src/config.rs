//! Client configuration.
//!
//! Settings are read from an optional TOML file and overridden by
//! environment variables prefixed with `CLOUDLIB_` (e.g. `CLOUDLIB_BASE_URL`).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default server address.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// Display name of the personal root folder.
pub const DEFAULT_HOME_FOLDER_NAME: &str = "My Cloud";

/// Connection settings for [`crate::http::HttpClient`] and [`crate::CloudSession`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Server origin; endpoints are resolved against it.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Optional proxy URL (e.g. "http://proxy:8080" or "socks5://proxy:1080").
    #[serde(default)]
    pub proxy: Option<String>,
    /// Transport timeout in seconds. No timeout when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Name given to the personal root folder in navigation paths.
    #[serde(default = "default_home_folder_name")]
    pub home_folder_name: String,
    /// User agent sent with each request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a configuration for the given server, other settings default.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Load configuration from an optional TOML file and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        let config = builder
            .add_source(config::Environment::with_prefix("CLOUDLIB").try_parsing(true))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            proxy: None,
            timeout_secs: None,
            home_folder_name: default_home_folder_name(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_home_folder_name() -> String {
    DEFAULT_HOME_FOLDER_NAME.to_string()
}

fn default_user_agent() -> String {
    format!("cloudlib/{}", env!("CARGO_PKG_VERSION"))
}
