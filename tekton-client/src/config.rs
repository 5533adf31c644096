//! Client configuration
//!
//! Service URL, credentials and transport settings, either set in code or
//! read from `CD_TEKTON_PIPELINE_*` environment variables.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::error::{ClientError, Result};

/// Service endpoint used when neither a URL nor a region is configured
pub const DEFAULT_SERVICE_URL: &str = "https://api.us-south.devops.cloud.ibm.com/pipeline/v2";

/// Regions hosting the service
pub const REGIONS: &[&str] = &[
    "us-south", "us-east", "eu-de", "eu-gb", "eu-es", "jp-osa", "jp-tok", "au-syd", "ca-tor",
    "ca-mon", "br-sao",
];

const ENV_PREFIX: &str = "CD_TEKTON_PIPELINE";

/// Resolve the service URL of a region
///
/// # Example
/// ```
/// use tekton_client::config::service_url_for_region;
///
/// let url = service_url_for_region("eu-de").unwrap();
/// assert_eq!(url, "https://api.eu-de.devops.cloud.ibm.com/pipeline/v2");
/// ```
pub fn service_url_for_region(region: &str) -> Result<String> {
    if !REGIONS.contains(&region) {
        return Err(ClientError::InvalidRequest(format!(
            "unknown region `{}`, expected one of: {}",
            region,
            REGIONS.join(", ")
        )));
    }
    Ok(format!(
        "https://api.{}.devops.cloud.ibm.com/pipeline/v2",
        region
    ))
}

/// Tekton pipeline client configuration
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the API, including the `/pipeline/v2` prefix
    pub service_url: String,

    /// Overall timeout of a single request
    pub timeout: Duration,

    /// Bearer token attached to every request
    pub bearer_token: Option<String>,

    /// Headers added to every request
    pub default_headers: BTreeMap<String, String>,

    /// Accept invalid TLS certificates (test environments only)
    pub disable_ssl_verification: bool,

    pub user_agent: String,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("service_url", &self.service_url)
            .field("timeout", &self.timeout)
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
            .field("default_headers", &self.default_headers)
            .field("disable_ssl_verification", &self.disable_ssl_verification)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ClientConfig {
    /// Creates a new configuration with defaults
    pub fn new(service_url: impl Into<String>) -> Self {
        Self {
            service_url: service_url.into(),
            timeout: Duration::from_secs(60),
            bearer_token: None,
            default_headers: BTreeMap::new(),
            disable_ssl_verification: false,
            user_agent: concat!("tekton-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Recognised environment variables:
    /// - CD_TEKTON_PIPELINE_URL (optional, wins over the region)
    /// - CD_TEKTON_PIPELINE_REGION (optional, default: us-south)
    /// - CD_TEKTON_PIPELINE_BEARER_TOKEN (optional)
    /// - CD_TEKTON_PIPELINE_TIMEOUT (optional, seconds, default: 60)
    /// - CD_TEKTON_PIPELINE_DISABLE_SSL (optional, `true` to disable)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ClientConfig::from_env`] with a custom variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |suffix: &str| {
            lookup(&format!("{}_{}", ENV_PREFIX, suffix)).filter(|v| !v.trim().is_empty())
        };

        let service_url = match (var("URL"), var("REGION")) {
            (Some(url), _) => url,
            (None, Some(region)) => service_url_for_region(region.trim())?,
            (None, None) => DEFAULT_SERVICE_URL.to_string(),
        };

        let mut config = Self::new(service_url);

        if let Some(timeout) = var("TIMEOUT") {
            let secs = timeout.trim().parse::<u64>().map_err(|_| {
                ClientError::InvalidRequest(format!(
                    "{}_TIMEOUT must be a number of seconds, got `{}`",
                    ENV_PREFIX, timeout
                ))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        config.bearer_token = var("BEARER_TOKEN");
        config.disable_ssl_verification = var("DISABLE_SSL")
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        config.validate()?;
        Ok(config)
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Adds a header sent with every request
    pub fn with_default_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.service_url.is_empty() {
            return Err(ClientError::InvalidRequest(
                "service_url cannot be empty".to_string(),
            ));
        }

        if !self.service_url.starts_with("http://") && !self.service_url.starts_with("https://") {
            return Err(ClientError::InvalidRequest(
                "service_url must start with http:// or https://".to_string(),
            ));
        }

        if self.timeout.is_zero() {
            return Err(ClientError::InvalidRequest(
                "timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE_URL)
    }
}
