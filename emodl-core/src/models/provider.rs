//! Provider-related types.
//!
//! - [`ProviderKind`] - Enum of supported emote providers
//! - [`UserScope`] - Account reference for user/channel-scoped lookups

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

// ============================================================================
// Provider Kind
// ============================================================================

/// Supported emote providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// BetterTTV
    Bttv,
    /// FrankerFaceZ
    Ffz,
    /// 7TV
    #[serde(rename = "7tv", alias = "seventv")]
    SevenTv,
}

impl ProviderKind {
    /// Returns the display name for this provider.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Bttv => "BTTV",
            Self::Ffz => "FFZ",
            Self::SevenTv => "7TV",
        }
    }

    /// Returns all available provider kinds.
    pub fn all() -> &'static [ProviderKind] {
        &[Self::Bttv, Self::Ffz, Self::SevenTv]
    }

    /// Returns the CLI name for this provider (lowercase, no spaces).
    pub fn cli_name(&self) -> &'static str {
        match self {
            Self::Bttv => "bttv",
            Self::Ffz => "ffz",
            Self::SevenTv => "7tv",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ============================================================================
// User Scope
// ============================================================================

/// Reference to an account whose channel emotes should be loaded.
///
/// Parsed from `platform:id` (for example `twitch:39226538`) or from a bare
/// provider-native account id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum UserScope {
    /// An account on a streaming platform linked to the provider.
    Platform {
        /// Platform name (`twitch`, `youtube`, ...).
        platform: String,
        /// Platform user id (not the username).
        platform_id: String,
    },
    /// A provider-native account id.
    Account {
        /// Account id as issued by the provider.
        id: String,
    },
}

impl UserScope {
    /// Creates a platform-linked scope.
    pub fn platform(platform: impl Into<String>, platform_id: impl Into<String>) -> Self {
        Self::Platform {
            platform: platform.into(),
            platform_id: platform_id.into(),
        }
    }

    /// Creates a provider-native account scope.
    pub fn account(id: impl Into<String>) -> Self {
        Self::Account { id: id.into() }
    }

    /// Returns the platform and platform id, if this is a platform scope.
    pub fn as_platform(&self) -> Option<(&str, &str)> {
        match self {
            Self::Platform {
                platform,
                platform_id,
            } => Some((platform.as_str(), platform_id.as_str())),
            Self::Account { .. } => None,
        }
    }
}

impl fmt::Display for UserScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Platform {
                platform,
                platform_id,
            } => write!(f, "{platform}:{platform_id}"),
            Self::Account { id } => f.write_str(id),
        }
    }
}

impl FromStr for UserScope {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(CoreError::InvalidScope("empty scope".to_string()));
        }

        match s.split_once(':') {
            Some((platform, id)) => {
                let platform = platform.trim().to_lowercase();
                let id = id.trim();
                if platform.is_empty() || id.is_empty() {
                    return Err(CoreError::InvalidScope(format!(
                        "expected platform:id, got {s:?}"
                    )));
                }
                Ok(Self::platform(platform, id))
            }
            None => Ok(Self::account(s)),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
