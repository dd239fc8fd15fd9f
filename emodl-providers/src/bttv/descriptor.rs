//! BTTV provider descriptor.

use emodl_core::ProviderKind;
use std::sync::Arc;

use super::api::BTTV_API_BASE;
use super::fetcher::BttvSource;
use crate::descriptor::{CliConfig, ProviderDescriptor, ProviderMetadata};
use crate::source::EmoteSource;

/// Returns the BTTV descriptor.
pub fn bttv_descriptor() -> ProviderDescriptor {
    ProviderDescriptor {
        id: ProviderKind::Bttv,
        metadata: ProviderMetadata {
            display_name: "BTTV",
            homepage: "https://betterttv.com",
            api_base: BTTV_API_BASE,
            supports_platform_user: true,
            supports_native_account: false,
        },
        cli: CliConfig {
            name: "bttv",
            aliases: &["betterttv"],
        },
        build_source: build_bttv_source,
    }
}

fn build_bttv_source() -> Arc<dyn EmoteSource> {
    Arc::new(BttvSource::new())
}
