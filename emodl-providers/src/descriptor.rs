//! Provider descriptor system.
//!
//! A descriptor contains all the static configuration for a provider:
//! - Metadata (display name, API base, supported lookups)
//! - CLI naming
//! - A factory for the provider's [`EmoteSource`]

use emodl_core::ProviderKind;
use std::sync::Arc;

use crate::source::EmoteSource;

// ============================================================================
// Provider Descriptor
// ============================================================================

/// Complete descriptor for a provider.
pub struct ProviderDescriptor {
    /// Provider identifier.
    pub id: ProviderKind,
    /// Display metadata.
    pub metadata: ProviderMetadata,
    /// CLI naming.
    pub cli: CliConfig,
    /// Builds the source used to fetch this provider.
    pub build_source: fn() -> Arc<dyn EmoteSource>,
}

impl ProviderDescriptor {
    /// Returns the display name.
    pub fn display_name(&self) -> &str {
        self.metadata.display_name
    }

    /// Returns the CLI name.
    pub fn cli_name(&self) -> &str {
        self.cli.name
    }

    /// Builds a fresh source for this provider.
    pub fn build_source(&self) -> Arc<dyn EmoteSource> {
        (self.build_source)()
    }
}

impl std::fmt::Debug for ProviderDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderDescriptor")
            .field("id", &self.id)
            .field("metadata", &self.metadata)
            .field("cli", &self.cli)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Metadata
// ============================================================================

/// Static display and capability information.
#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    /// Human-readable name.
    pub display_name: &'static str,
    /// Provider website.
    pub homepage: &'static str,
    /// Base URL of the REST API.
    pub api_base: &'static str,
    /// Whether a `platform:id` user lookup is available.
    pub supports_platform_user: bool,
    /// Whether a provider-native account id lookup is available.
    pub supports_native_account: bool,
}

// ============================================================================
// CLI Config
// ============================================================================

/// CLI naming for a provider.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Primary CLI name.
    pub name: &'static str,
    /// Alternative names.
    pub aliases: &'static [&'static str],
}
