//! Authentication injection
//!
//! Credentials are applied to each request right before it is sent. Token
//! issuance is left to the caller; the client only attaches what it is given.

use async_trait::async_trait;
use reqwest::RequestBuilder;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use std::fmt;

use crate::error::{ClientError, Result};

/// Adds credentials to outgoing requests
#[async_trait]
pub trait Authenticator: Send + Sync + fmt::Debug {
    /// Decorate the request with credentials
    async fn authenticate(&self, request: RequestBuilder) -> Result<RequestBuilder>;

    /// Short name of the scheme, used in logs
    fn scheme(&self) -> &'static str;
}

/// Sends requests without credentials
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuth;

#[async_trait]
impl Authenticator for NoAuth {
    async fn authenticate(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        Ok(request)
    }

    fn scheme(&self) -> &'static str {
        "none"
    }
}

/// Static bearer token, e.g. an IAM access token obtained elsewhere
#[derive(Clone)]
pub struct BearerToken {
    header: HeaderValue,
}

impl BearerToken {
    /// Create a bearer authenticator
    ///
    /// Fails when the token is empty or cannot be sent as a header value.
    pub fn new(token: impl AsRef<str>) -> Result<Self> {
        let token = token.as_ref().trim();
        if token.is_empty() {
            return Err(ClientError::Auth("bearer token is empty".to_string()));
        }

        let mut header = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| {
                ClientError::Auth("bearer token contains invalid characters".to_string())
            })?;
        header.set_sensitive(true);

        Ok(Self { header })
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerToken").field("token", &"<redacted>").finish()
    }
}

/// The configured token replaces any `Authorization` header already on the
/// request, so exactly one is sent.
#[async_trait]
impl Authenticator for BearerToken {
    async fn authenticate(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let credentials = HeaderMap::from_iter([(AUTHORIZATION, self.header.clone())]);
        Ok(request.headers(credentials))
    }

    fn scheme(&self) -> &'static str {
        "bearer"
    }
}
