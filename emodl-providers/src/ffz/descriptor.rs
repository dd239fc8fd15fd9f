//! FFZ provider descriptor.

use emodl_core::ProviderKind;
use std::sync::Arc;

use super::api::FFZ_API_BASE;
use super::fetcher::FfzSource;
use crate::descriptor::{CliConfig, ProviderDescriptor, ProviderMetadata};
use crate::source::EmoteSource;

/// Returns the FFZ descriptor.
pub fn ffz_descriptor() -> ProviderDescriptor {
    ProviderDescriptor {
        id: ProviderKind::Ffz,
        metadata: ProviderMetadata {
            display_name: "FFZ",
            homepage: "https://www.frankerfacez.com",
            api_base: FFZ_API_BASE,
            supports_platform_user: true,
            supports_native_account: false,
        },
        cli: CliConfig {
            name: "ffz",
            aliases: &["frankerfacez"],
        },
        build_source: build_ffz_source,
    }
}

fn build_ffz_source() -> Arc<dyn EmoteSource> {
    Arc::new(FfzSource::new())
}
