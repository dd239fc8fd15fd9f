//! HTTP client with tracing and domain allowlist.
//!
//! This module provides a wrapped HTTP client that adds:
//! - Request/response tracing
//! - Domain allowlist for security
//! - JSON decoding that follows the provider error-payload convention

use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::error::{FetchError, HttpError};

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent string for emodl.
const USER_AGENT: &str = concat!("emodl/", env!("CARGO_PKG_VERSION"));

/// API hosts of the supported emote providers.
pub const PROVIDER_DOMAINS: &[&str] = &["api.betterttv.net", "api.frankerfacez.com", "7tv.io"];

// ============================================================================
// Error Payload
// ============================================================================

/// Error body returned by the providers on non-success responses.
///
/// ```json
/// {"error": {"message": "Unknown Emote Set"}}
/// ```
#[derive(Debug, Deserialize)]
pub struct ApiErrorPayload {
    /// Error details.
    pub error: ApiErrorDetail,
}

/// Inner error object of [`ApiErrorPayload`].
#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    /// Human-readable message.
    pub message: String,
}

// ============================================================================
// HTTP Client
// ============================================================================

/// HTTP client wrapper with tracing and domain allowlist.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    allowed_domains: Option<Vec<String>>,
}

impl HttpClient {
    /// Creates a new HTTP client with default settings.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a new HTTP client with a custom timeout.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built. This should only occur
    /// if the system's TLS configuration is fundamentally broken, making
    /// network operations impossible.
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|e| {
                panic!(
                    "Failed to create HTTP client: {e}. \
                    This usually indicates a broken TLS configuration."
                )
            });

        Self {
            inner: client,
            allowed_domains: None,
        }
    }

    /// Creates a client restricted to the provider API hosts.
    pub fn for_providers(timeout: Duration) -> Self {
        let mut client = Self::with_timeout(timeout);
        client.allowed_domains = Some(PROVIDER_DOMAINS.iter().map(|d| (*d).to_string()).collect());
        client
    }

    /// Checks if a URL's domain is allowed.
    fn is_domain_allowed(&self, url: &str) -> Result<(), HttpError> {
        let Some(ref allowed) = self.allowed_domains else {
            return Ok(());
        };

        let parsed = Url::parse(url).map_err(|e| HttpError::InvalidUrl(e.to_string()))?;

        let host = parsed
            .host_str()
            .ok_or_else(|| HttpError::InvalidUrl("No host in URL".to_string()))?;

        let allowed = allowed
            .iter()
            .any(|domain| host == domain || host.ends_with(&format!(".{domain}")));

        if allowed {
            Ok(())
        } else {
            Err(HttpError::DomainNotAllowed(host.to_string()))
        }
    }

    /// Performs a GET request.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get(&self, url: &str) -> Result<Response, HttpError> {
        self.is_domain_allowed(url)?;
        debug!("GET request");

        let response = self.inner.get(url).send().await?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }

    /// Performs a GET request and decodes the JSON body.
    ///
    /// Non-success statuses are turned into [`FetchError::Api`] when the body
    /// carries a structured error, otherwise into [`FetchError::Status`] with
    /// the status line and the raw body. `context` names the payload in
    /// decode errors.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        context: &str,
    ) -> Result<T, FetchError> {
        let response = self.get(url).await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await?;
            return Err(status_error(status, body));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            warn!(error = %e, context, "Failed to decode response");
            FetchError::decode(context, e)
        })
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps a non-success response to the matching [`FetchError`].
fn status_error(status: reqwest::StatusCode, body: String) -> FetchError {
    match serde_json::from_str::<ApiErrorPayload>(&body) {
        Ok(payload) => FetchError::Api {
            status: status.as_u16(),
            message: payload.error.message,
        },
        Err(_) => FetchError::Status {
            status: status.to_string(),
            body,
        },
    }
}

// ============================================================================
// Tests
// ============================================================================
