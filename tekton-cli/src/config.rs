//! Configuration module
//!
//! Turns the global CLI flags into a client.

use std::time::Duration;

use anyhow::{Context, Result};
use tekton_client::config::service_url_for_region;
use tekton_client::{ClientConfig, TektonPipelineClient};

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Explicit service URL, wins over the region
    pub service_url: Option<String>,
    pub region: String,
    pub token: Option<String>,
    pub timeout_seconds: u64,
    pub insecure: bool,
}

impl Config {
    /// Resolve the client configuration
    pub fn client_config(&self) -> Result<ClientConfig> {
        let service_url = match &self.service_url {
            Some(url) => url.clone(),
            None => service_url_for_region(&self.region)?,
        };

        let mut config = ClientConfig::new(service_url)
            .with_timeout(Duration::from_secs(self.timeout_seconds));
        config.bearer_token = self.token.clone();
        config.disable_ssl_verification = self.insecure;
        config.user_agent = concat!("tekton-cli/", env!("CARGO_PKG_VERSION")).to_string();
        Ok(config)
    }

    /// Build a client for the configured service
    pub fn client(&self) -> Result<TektonPipelineClient> {
        let config = self.client_config()?;
        TektonPipelineClient::from_config(&config).context("Failed to create API client")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            service_url: None,
            region: "us-south".to_string(),
            token: None,
            timeout_seconds: 60,
            insecure: false,
        }
    }

    #[test]
    fn test_region_resolves_service_url() {
        let config = Config {
            region: "eu-de".to_string(),
            ..config()
        };
        assert_eq!(
            config.client_config().unwrap().service_url,
            "https://api.eu-de.devops.cloud.ibm.com/pipeline/v2"
        );
    }

    #[test]
    fn test_service_url_wins_over_region() {
        let config = Config {
            service_url: Some("http://localhost:8080/pipeline/v2".to_string()),
            region: "nowhere".to_string(),
            ..config()
        };
        assert_eq!(
            config.client_config().unwrap().service_url,
            "http://localhost:8080/pipeline/v2"
        );
    }

    #[test]
    fn test_unknown_region_is_rejected() {
        let config = Config {
            region: "mars-1".to_string(),
            ..config()
        };
        assert!(config.client_config().is_err());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let config = Config {
            timeout_seconds: 0,
            ..config()
        };
        assert!(config.client().is_err());
    }
}
