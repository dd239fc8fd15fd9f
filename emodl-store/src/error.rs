//! Store error types.

use emodl_core::{CoreError, ProviderKind};
use emodl_fetch::FetchError;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Store Error
// ============================================================================

/// Errors from configuration handling.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid value in a core type (e.g. a malformed scope).
    #[error(transparent)]
    Core(#[from] CoreError),
}

// ============================================================================
// Provider Failures
// ============================================================================

/// Which fetch of a provider failed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FetchStage {
    /// The provider's global emotes.
    Global,
    /// A user/channel lookup.
    User,
    /// One emote set resolved from a user lookup.
    Set(String),
}

impl fmt::Display for FetchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => write!(f, "global"),
            Self::User => write!(f, "user"),
            Self::Set(id) => write!(f, "set {id}"),
        }
    }
}

/// A single failed fetch task.
#[derive(Debug, Error)]
#[error("{provider} {stage}: {error}")]
pub struct ProviderFailure {
    /// Provider the task fetched from.
    pub provider: ProviderKind,
    /// What the task fetched.
    pub stage: FetchStage,
    /// The underlying error.
    #[source]
    pub error: FetchError,
}

impl ProviderFailure {
    /// Creates a failure record.
    pub fn new(provider: ProviderKind, stage: FetchStage, error: FetchError) -> Self {
        Self {
            provider,
            stage,
            error,
        }
    }
}

/// Every task failure of one load, joined.
///
/// No failure shadows another; [`Display`](fmt::Display) prints one line
/// per failure.
#[derive(Debug, Default)]
pub struct JoinedError {
    failures: Vec<ProviderFailure>,
}

impl JoinedError {
    /// Creates an empty error set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a failure.
    pub fn push(&mut self, failure: ProviderFailure) {
        self.failures.push(failure);
    }

    /// Returns true if no task failed.
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns the number of failures.
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Returns the failures.
    pub fn failures(&self) -> &[ProviderFailure] {
        &self.failures
    }

    /// Returns the failures of one provider.
    pub fn for_provider(&self, provider: ProviderKind) -> impl Iterator<Item = &ProviderFailure> {
        self.failures.iter().filter(move |f| f.provider == provider)
    }

    /// Orders failures by provider, then stage.
    pub(crate) fn sort(&mut self) {
        self.failures
            .sort_by(|a, b| (a.provider, &a.stage).cmp(&(b.provider, &b.stage)));
    }
}

impl fmt::Display for JoinedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.failures.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{failure}")?;
        }
        Ok(())
    }
}

impl std::error::Error for JoinedError {}

impl IntoIterator for JoinedError {
    type Item = ProviderFailure;
    type IntoIter = std::vec::IntoIter<ProviderFailure>;

    fn into_iter(self) -> Self::IntoIter {
        self.failures.into_iter()
    }
}

// ============================================================================
// Load Error
// ============================================================================

/// Why a load did not complete cleanly.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The deadline passed before every task finished.
    #[error("{}", deadline_message(*.deadline, .errors))]
    DeadlineExceeded {
        /// The deadline that was exceeded.
        deadline: Duration,
        /// Failures collected before the deadline.
        errors: JoinedError,
    },

    /// At least one task failed.
    #[error(transparent)]
    Providers(JoinedError),

    /// The merge consumer crashed; nothing it merged survived.
    #[error("merging fetch results failed")]
    MergeFailed {
        /// Failures known when the consumer crashed (normally none survive).
        errors: JoinedError,
    },
}

fn deadline_message(deadline: Duration, errors: &JoinedError) -> String {
    if errors.is_empty() {
        format!("deadline of {deadline:?} exceeded")
    } else {
        format!("deadline of {deadline:?} exceeded\n{errors}")
    }
}

impl LoadError {
    /// Returns the joined task failures.
    pub fn errors(&self) -> &JoinedError {
        match self {
            Self::DeadlineExceeded { errors, .. }
            | Self::Providers(errors)
            | Self::MergeFailed { errors } => errors,
        }
    }

    /// Returns true if the deadline was exceeded.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::DeadlineExceeded { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(provider: ProviderKind, stage: FetchStage, msg: &str) -> ProviderFailure {
        ProviderFailure::new(
            provider,
            stage,
            FetchError::Api {
                status: 500,
                message: msg.to_string(),
            },
        )
    }

    #[test]
    fn test_joined_error_lists_every_failure() {
        let mut errors = JoinedError::new();
        errors.push(failure(ProviderKind::SevenTv, FetchStage::Set("s1".into()), "boom"));
        errors.push(failure(ProviderKind::Bttv, FetchStage::Global, "down"));
        errors.sort();

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.to_string(), "BTTV global: down\n7TV set s1: boom");
        assert_eq!(errors.for_provider(ProviderKind::Ffz).count(), 0);
    }

    #[test]
    fn test_load_error_messages() {
        let err = LoadError::DeadlineExceeded {
            deadline: Duration::from_secs(5),
            errors: JoinedError::new(),
        };
        assert!(err.is_timeout());
        assert_eq!(err.to_string(), "deadline of 5s exceeded");

        let mut errors = JoinedError::new();
        errors.push(failure(ProviderKind::Ffz, FetchStage::User, "no room"));
        let err = LoadError::Providers(errors);
        assert!(!err.is_timeout());
        assert_eq!(err.to_string(), "FFZ user: no room");

        let err = LoadError::MergeFailed {
            errors: JoinedError::new(),
        };
        assert!(!err.is_timeout());
        assert_eq!(err.to_string(), "merging fetch results failed");
    }
}
