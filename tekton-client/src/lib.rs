//! Tekton Pipeline HTTP Client
//!
//! A type-safe async client for the Tekton pipeline REST API.
//!
//! Every API operation is a method on [`TektonPipelineClient`] taking the
//! matching options struct from [`tekton_core::dto`]. Transport, TLS and
//! timeouts are handled by `reqwest`; this crate only builds requests and
//! decodes responses.
//!
//! # Example
//!
//! ```no_run
//! use tekton_client::TektonPipelineClient;
//! use tekton_core::dto::run::{CreateTektonPipelineRunOptions, PipelineRunTrigger};
//! use uuid::Uuid;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = TektonPipelineClient::from_env()?;
//!     let pipeline_id = Uuid::parse_str("94619026-912b-4d92-8f51-6c74f0692d90")?;
//!
//!     // Start a run from the manual trigger
//!     let run = client
//!         .create_tekton_pipeline_run(&CreateTektonPipelineRunOptions::new(
//!             pipeline_id,
//!             PipelineRunTrigger::new("Manual Trigger").with_property("branch", "main"),
//!         ))
//!         .await?;
//!
//!     println!("Started run {} ({})", run.id, run.status);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod config;
pub mod error;
mod definitions;
mod pagination;
mod pipelines;
mod properties;
mod runs;
mod triggers;

// Re-export commonly used types
pub use auth::{Authenticator, BearerToken, NoAuth};
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use pagination::{PipelineRunsPager, start_from_href};

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::sync::Arc;
use tekton_core::dto::RequestOptions;
use tekton_core::validation::Validate;

const MERGE_PATCH_JSON: &str = "application/merge-patch+json";

/// HTTP client for the Tekton pipeline API
///
/// The client is cheap to clone and safe to share between tasks. Methods are
/// organized into groups:
/// - Pipelines (create, get, update, delete)
/// - Pipeline runs (list, start, cancel, rerun, logs)
/// - Definitions
/// - Pipeline properties and trigger properties
/// - Triggers (including duplication)
#[derive(Debug, Clone)]
pub struct TektonPipelineClient {
    /// Base URL of the service (e.g., "https://api.us-south.devops.cloud.ibm.com/pipeline/v2")
    base_url: String,
    /// HTTP client instance
    client: Client,
    /// Credentials applied to every request
    authenticator: Arc<dyn Authenticator>,
}

impl TektonPipelineClient {
    /// Create a new client without credentials
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the API (e.g., "http://localhost:8080/pipeline/v2")
    ///
    /// # Example
    /// ```
    /// use tekton_client::TektonPipelineClient;
    ///
    /// let client = TektonPipelineClient::new("http://localhost:8080/pipeline/v2");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use tekton_client::TektonPipelineClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = TektonPipelineClient::with_client("http://localhost:8080", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            authenticator: Arc::new(NoAuth),
        }
    }

    /// Create a client from a configuration
    ///
    /// Builds the underlying HTTP client with the configured timeout, TLS
    /// settings, user agent and default headers, and installs a bearer
    /// authenticator when a token is configured.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .default_headers(header_map(&config.default_headers)?);
        if config.disable_ssl_verification {
            tracing::warn!("TLS certificate verification is disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = Self::with_client(config.service_url.clone(), builder.build()?);
        match &config.bearer_token {
            Some(token) => Ok(client.with_authenticator(BearerToken::new(token)?)),
            None => Ok(client),
        }
    }

    /// Create a client configured from `CD_TEKTON_PIPELINE_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_config(&ClientConfig::from_env()?)
    }

    /// Replace the authenticator
    pub fn with_authenticator(mut self, authenticator: impl Authenticator + 'static) -> Self {
        self.authenticator = Arc::new(authenticator);
        self
    }

    /// Get the base URL of the service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Request Builders
    // =============================================================================

    /// Build the URL of an endpoint from its path segments
    ///
    /// Each segment is percent-encoded, so names containing `/` or spaces
    /// stay a single segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            ClientError::InvalidRequest(format!("invalid service URL `{}`: {}", self.base_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                ClientError::InvalidRequest(format!(
                    "service URL `{}` cannot have a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Start a request with the per-call headers of `options`
    fn request(
        &self,
        method: Method,
        url: Url,
        options: &impl RequestOptions,
    ) -> Result<RequestBuilder> {
        tracing::debug!(%method, %url, "building request");
        Ok(self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json")
            .headers(header_map(options.headers())?))
    }

    /// Authenticate and send a request
    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response> {
        let request = self.authenticator.authenticate(request).await?;
        let response = request.send().await?;
        tracing::debug!(
            status = response.status().as_u16(),
            url = %response.url(),
            auth = self.authenticator.scheme(),
            "received response"
        );
        Ok(response)
    }

    /// Send a request and decode its JSON response
    async fn call<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.send(request).await?;
        self.handle_response(response).await
    }

    /// Send a request whose response has no body
    async fn call_empty(&self, request: RequestBuilder) -> Result<()> {
        let response = self.send(request).await?;
        self.handle_empty_response(response).await
    }

    /// Attach a JSON merge patch body
    fn merge_patch(request: RequestBuilder, patch: &impl Serialize) -> Result<RequestBuilder> {
        let body = serde_json::to_vec(patch)?;
        Ok(request.header(CONTENT_TYPE, MERGE_PATCH_JSON).body(body))
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            return Err(self.error_from(response).await);
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body)
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response that returns no content (e.g., DELETE operations)
    ///
    /// This method checks the status code and returns an error if the request failed.
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        if !response.status().is_success() {
            return Err(self.error_from(response).await);
        }

        Ok(())
    }

    async fn error_from(&self, response: reqwest::Response) -> ClientError {
        let status = response.status();
        let url = response.url().clone();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        tracing::warn!(status = status.as_u16(), %url, "request failed");
        ClientError::from_response_body(status.as_u16(), &error_text)
    }
}

/// Validate options before any I/O happens
fn validated<T: Validate>(options: &T) -> Result<&T> {
    options.validate()?;
    Ok(options)
}

/// Convert plain string headers to a header map
fn header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ClientError::InvalidRequest(format!("invalid header name `{}`", name)))?;
        let value = HeaderValue::from_str(value).map_err(|_| {
            ClientError::InvalidRequest(format!("invalid value for header `{}`", name))
        })?;
        map.insert(name, value);
    }
    Ok(map)
}
