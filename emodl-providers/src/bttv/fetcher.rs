//! BTTV emote source.

use async_trait::async_trait;
use emodl_core::{ProviderKind, UserScope};
use emodl_fetch::{FetchContext, FetchError};

use super::api::BttvApiClient;
use crate::source::{EmoteSource, NativeEmote, UserEmotes};

/// Fetches BTTV global and channel emotes.
#[derive(Debug, Clone, Default)]
pub struct BttvSource {
    api: BttvApiClient,
}

impl BttvSource {
    /// Creates a source for the public API.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source backed by a specific API client.
    pub fn with_client(api: BttvApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl EmoteSource for BttvSource {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Bttv
    }

    async fn fetch_global(&self, ctx: &FetchContext) -> Result<Vec<NativeEmote>, FetchError> {
        let emotes = self.api.global_emotes(&ctx.http).await?;
        Ok(emotes.into_iter().map(NativeEmote::Bttv).collect())
    }

    async fn fetch_user(
        &self,
        ctx: &FetchContext,
        scope: &UserScope,
    ) -> Result<UserEmotes, FetchError> {
        let Some((platform, platform_id)) = scope.as_platform() else {
            return Err(FetchError::InvalidScope(format!(
                "BTTV needs a platform:id scope, got account {scope}"
            )));
        };

        let emotes = self.api.user_emotes(&ctx.http, platform, platform_id).await?;
        Ok(UserEmotes::Emotes(
            emotes.into_iter().map(NativeEmote::Bttv).collect(),
        ))
    }
}
