/*
[INPUT]:  HTTP configuration (base URL, optional timeouts)
[OUTPUT]: Configured reqwest client ready for task API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use reqwest::{Client, Method, RequestBuilder, Url};
use std::time::Duration;

use crate::http::{Result, TaskApiError};

/// Base URL of the task API when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// HTTP client configuration
///
/// Both timeouts are unset by default, leaving the transport defaults in charge.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    pub timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
}

/// HTTP client for the task API
#[derive(Debug, Clone)]
pub struct TaskClient {
    http_client: Client,
    base_url: Url,
}

impl TaskClient {
    /// Create a new client against the default base URL
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_base_url(config, DEFAULT_BASE_URL)
    }

    /// Create a new client with custom configuration and base URL
    pub fn with_base_url(config: ClientConfig, base_url: &str) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = config.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        let http_client = builder.build()?;

        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(TaskApiError::Config(format!(
                "base URL cannot carry a path: {base_url}"
            )));
        }

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Base URL all endpoints are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the URL for the given path segments below the base URL.
    ///
    /// Each segment is percent-encoded on its own, so ids never leak `/` or `?`.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TaskApiError::Config(format!("invalid base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Build request builder for a task endpoint
    pub(crate) fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let url = self.endpoint(segments)?;
        Ok(self.http_client.request(method, url))
    }
}
