//! 7TV emote source.

use async_trait::async_trait;
use emodl_core::{ProviderKind, UserScope};
use emodl_fetch::{FetchContext, FetchError};

use super::api::SevenTvApiClient;
use crate::source::{EmoteSource, NativeEmote, UserEmotes};

/// Fetches 7TV global and per-user emote sets.
///
/// User lookups only resolve set ids; the loader fetches each set through
/// [`EmoteSource::fetch_set`].
#[derive(Debug, Clone, Default)]
pub struct SevenTvSource {
    api: SevenTvApiClient,
}

impl SevenTvSource {
    /// Creates a source for the public API.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source backed by a specific API client.
    pub fn with_client(api: SevenTvApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl EmoteSource for SevenTvSource {
    fn kind(&self) -> ProviderKind {
        ProviderKind::SevenTv
    }

    async fn fetch_global(&self, ctx: &FetchContext) -> Result<Vec<NativeEmote>, FetchError> {
        let emotes = self.api.global_emotes(&ctx.http).await?;
        Ok(emotes.into_iter().map(NativeEmote::SevenTv).collect())
    }

    async fn fetch_user(
        &self,
        ctx: &FetchContext,
        scope: &UserScope,
    ) -> Result<UserEmotes, FetchError> {
        let ids = self.api.user_set_ids(&ctx.http, scope).await?;
        Ok(UserEmotes::Sets(ids))
    }

    async fn fetch_set(
        &self,
        ctx: &FetchContext,
        set_id: &str,
    ) -> Result<Vec<NativeEmote>, FetchError> {
        let emotes = self.api.set_emotes(&ctx.http, set_id).await?;
        Ok(emotes.into_iter().map(NativeEmote::SevenTv).collect())
    }
}
