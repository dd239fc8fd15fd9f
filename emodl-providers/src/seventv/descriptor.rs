//! 7TV provider descriptor.

use emodl_core::ProviderKind;
use std::sync::Arc;

use super::api::SEVENTV_API_BASE;
use super::fetcher::SevenTvSource;
use crate::descriptor::{CliConfig, ProviderDescriptor, ProviderMetadata};
use crate::source::EmoteSource;

/// Returns the 7TV descriptor.
pub fn seventv_descriptor() -> ProviderDescriptor {
    ProviderDescriptor {
        id: ProviderKind::SevenTv,
        metadata: ProviderMetadata {
            display_name: "7TV",
            homepage: "https://7tv.app",
            api_base: SEVENTV_API_BASE,
            supports_platform_user: true,
            supports_native_account: true,
        },
        cli: CliConfig {
            name: "7tv",
            aliases: &["seventv"],
        },
        build_source: build_seventv_source,
    }
}

fn build_seventv_source() -> Arc<dyn EmoteSource> {
    Arc::new(SevenTvSource::new())
}
