//! FFZ emote source.

use async_trait::async_trait;
use emodl_core::{ProviderKind, UserScope};
use emodl_fetch::{FetchContext, FetchError};

use super::api::FfzApiClient;
use crate::source::{EmoteSource, NativeEmote, UserEmotes};

/// Fetches FFZ global sets and channel room sets.
#[derive(Debug, Clone, Default)]
pub struct FfzSource {
    api: FfzApiClient,
}

impl FfzSource {
    /// Creates a source for the public API.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source backed by a specific API client.
    pub fn with_client(api: FfzApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl EmoteSource for FfzSource {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Ffz
    }

    async fn fetch_global(&self, ctx: &FetchContext) -> Result<Vec<NativeEmote>, FetchError> {
        let emotes = self.api.global_emotes(&ctx.http).await?;
        Ok(emotes.into_iter().map(NativeEmote::Ffz).collect())
    }

    async fn fetch_user(
        &self,
        ctx: &FetchContext,
        scope: &UserScope,
    ) -> Result<UserEmotes, FetchError> {
        let Some((platform, platform_id)) = scope.as_platform() else {
            return Err(FetchError::InvalidScope(format!(
                "FFZ needs a platform:id scope, got account {scope}"
            )));
        };

        let set = self.api.room_set(&ctx.http, platform, platform_id).await?;
        Ok(UserEmotes::Emotes(
            set.emotes.into_iter().map(NativeEmote::Ffz).collect(),
        ))
    }
}
