//! Static lookup of the BTTV, FFZ and 7TV descriptors.
//!
//! The loader builds its default sources from here, and the CLI resolves
//! provider names and aliases (`seventv`, `frankerfacez`) through it.

use emodl_core::ProviderKind;
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::bttv::bttv_descriptor;
use crate::descriptor::ProviderDescriptor;
use crate::ffz::ffz_descriptor;
use crate::seventv::seventv_descriptor;

// ============================================================================
// Static Registry
// ============================================================================

/// Static storage for all provider descriptors.
static DESCRIPTORS: OnceLock<Vec<ProviderDescriptor>> = OnceLock::new();

/// Static storage for CLI name to provider kind mapping.
static CLI_NAME_MAP: OnceLock<HashMap<String, ProviderKind>> = OnceLock::new();

fn init_descriptors() -> Vec<ProviderDescriptor> {
    vec![bttv_descriptor(), ffz_descriptor(), seventv_descriptor()]
}

/// Builds the CLI name to provider kind mapping.
fn build_cli_name_map(descriptors: &[ProviderDescriptor]) -> HashMap<String, ProviderKind> {
    let mut map = HashMap::new();

    for desc in descriptors {
        map.insert(desc.cli.name.to_string(), desc.id);

        for alias in desc.cli.aliases {
            map.insert((*alias).to_string(), desc.id);
        }
    }

    map
}

// ============================================================================
// Provider Registry
// ============================================================================

/// Global registry of all provider descriptors.
pub struct ProviderRegistry;

impl ProviderRegistry {
    /// Returns all provider descriptors.
    pub fn all() -> &'static [ProviderDescriptor] {
        DESCRIPTORS.get_or_init(init_descriptors)
    }

    /// Gets a provider descriptor by kind.
    pub fn get(id: ProviderKind) -> Option<&'static ProviderDescriptor> {
        Self::all().iter().find(|d| d.id == id)
    }

    /// Looks up a provider by CLI name or alias (case-insensitive).
    pub fn get_by_cli_name(name: &str) -> Option<&'static ProviderDescriptor> {
        let names = CLI_NAME_MAP.get_or_init(|| build_cli_name_map(Self::all()));
        let kind = names.get(&name.trim().to_lowercase())?;
        Self::get(*kind)
    }

    /// Returns the number of registered providers.
    pub fn count() -> usize {
        Self::all().len()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_every_kind() {
        assert_eq!(ProviderRegistry::count(), ProviderKind::all().len());

        for kind in ProviderKind::all() {
            let desc = ProviderRegistry::get(*kind);
            assert!(desc.is_some(), "Should find provider {kind:?}");
            assert_eq!(desc.unwrap().id, *kind);
        }
    }

    #[test]
    fn test_cli_name_lookup() {
        assert_eq!(ProviderRegistry::get_by_cli_name("bttv").unwrap().id, ProviderKind::Bttv);
        assert_eq!(ProviderRegistry::get_by_cli_name("FFZ").unwrap().id, ProviderKind::Ffz);

        let seventv = ProviderRegistry::get_by_cli_name("seventv");
        assert_eq!(seventv.unwrap().id, ProviderKind::SevenTv);
        assert_eq!(ProviderRegistry::get_by_cli_name("7tv").unwrap().id, ProviderKind::SevenTv);

        assert!(ProviderRegistry::get_by_cli_name("twitch").is_none());
    }

    #[test]
    fn test_built_sources_match_descriptor() {
        for desc in ProviderRegistry::all() {
            assert_eq!(desc.build_source().kind(), desc.id);
        }
    }

    #[test]
    fn test_only_seventv_resolves_native_accounts() {
        let native: Vec<_> = ProviderRegistry::all()
            .iter()
            .filter(|d| d.metadata.supports_native_account)
            .map(|d| d.id)
            .collect();
        assert_eq!(native, vec![ProviderKind::SevenTv]);
    }
}
