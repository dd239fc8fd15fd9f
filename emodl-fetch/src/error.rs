//! Fetch error types.

use thiserror::Error;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for a single provider fetch.
///
/// Each fetch surfaces exactly one of these. The variants follow the
/// provider error convention: transport failures pass through unchanged,
/// non-success statuses carry either the provider's structured message or
/// the raw status line and body.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, connect, TLS, timeout) or a refused URL.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Non-success status with a structured `{"error":{"message"}}` payload.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message reported by the provider.
        message: String,
    },

    /// Non-success status whose body is not a structured error.
    #[error("{status}\n{body}")]
    Status {
        /// Status line, e.g. `404 Not Found`.
        status: String,
        /// Raw response body.
        body: String,
    },

    /// A successful response whose body could not be decoded.
    #[error("Failed to decode {context}: {source}")]
    Decode {
        /// What was being decoded.
        context: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A user scope the provider cannot look up.
    #[error("Invalid user scope: {0}")]
    InvalidScope(String),

    /// The provider does not support this kind of lookup.
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// An emote record without any usable image.
    #[error("Emote {0} has no usable image")]
    MissingImage(String),

    /// The task running the fetch panicked or was cancelled by the runtime.
    #[error("Fetch task panicked: {0}")]
    TaskPanicked(String),
}

impl FetchError {
    /// Creates a decode error for the given context.
    pub fn decode(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            context: context.into(),
            source,
        }
    }

    /// Returns true if the provider answered with a non-success status.
    pub fn is_status(&self) -> bool {
        matches!(self, Self::Api { .. } | Self::Status { .. })
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Http(HttpError::Request(err))
    }
}

impl From<emodl_core::CoreError> for FetchError {
    fn from(err: emodl_core::CoreError) -> Self {
        FetchError::InvalidScope(err.to_string())
    }
}

// ============================================================================
// HTTP Error
// ============================================================================

/// HTTP-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request error, surfaced verbatim.
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    /// Domain not allowed.
    #[error("Domain not allowed: {0}")]
    DomainNotAllowed(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

// ============================================================================
// Tests
// ============================================================================
