//! Core error types for emodl.

use thiserror::Error;

/// Core error type for emodl operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Unknown provider name.
    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    /// A user scope could not be parsed or is incomplete.
    #[error("Invalid user scope: {0}")]
    InvalidScope(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
