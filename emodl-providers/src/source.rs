//! Emote source trait and the provider-tagged native record.
//!
//! A source represents one provider's set of fetch operations. Sources are
//! stateless with respect to the loader: they only return records, the
//! loader decides where those records end up.

use async_trait::async_trait;
use emodl_core::{Emote, EstimateSize, ProviderKind, UserScope};
use emodl_fetch::{FetchContext, FetchError};

use crate::bttv::BttvEmote;
use crate::ffz::FfzEmote;
use crate::seventv::SevenTvEmote;

// ============================================================================
// Native Emote
// ============================================================================

/// A provider-native emote record tagged with its provider.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeEmote {
    /// BetterTTV record.
    Bttv(BttvEmote),
    /// FrankerFaceZ record.
    Ffz(FfzEmote),
    /// 7TV record.
    SevenTv(SevenTvEmote),
}

impl NativeEmote {
    /// Returns the provider this record came from.
    pub fn kind(&self) -> ProviderKind {
        match self {
            Self::Bttv(_) => ProviderKind::Bttv,
            Self::Ffz(_) => ProviderKind::Ffz,
            Self::SevenTv(_) => ProviderKind::SevenTv,
        }
    }

    /// Returns the emote name (the catalog key).
    pub fn name(&self) -> &str {
        match self {
            Self::Bttv(e) => &e.name,
            Self::Ffz(e) => &e.name,
            Self::SevenTv(e) => &e.name,
        }
    }

    /// Normalizes the record into an [`Emote`].
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::MissingImage`] if the record has no usable image.
    pub fn to_emote(&self) -> Result<Emote, FetchError> {
        match self {
            Self::Bttv(e) => Ok(e.to_emote()),
            Self::Ffz(e) => e.to_emote(),
            Self::SevenTv(e) => e.to_emote(),
        }
    }
}

impl EstimateSize for NativeEmote {
    fn estimated_size(&self) -> usize {
        match self {
            Self::Bttv(e) => e.estimated_size(),
            Self::Ffz(e) => e.estimated_size(),
            Self::SevenTv(e) => e.estimated_size(),
        }
    }
}

// ============================================================================
// User Emotes
// ============================================================================

/// Result of a user-scoped lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum UserEmotes {
    /// The lookup returned the emotes directly.
    Emotes(Vec<NativeEmote>),
    /// The lookup resolved emote set ids that must each be fetched with
    /// [`EmoteSource::fetch_set`].
    Sets(Vec<String>),
}

// ============================================================================
// Emote Source Trait
// ============================================================================

/// One provider's fetch operations.
///
/// Every method performs its own network calls and returns exactly one
/// result; nothing here touches shared state.
///
/// ## Implementing a Source
///
/// ```ignore
/// struct MySource;
///
/// #[async_trait]
/// impl EmoteSource for MySource {
///     fn kind(&self) -> ProviderKind {
///         ProviderKind::Bttv
///     }
///
///     async fn fetch_global(&self, ctx: &FetchContext) -> Result<Vec<NativeEmote>, FetchError> {
///         // GET the provider's global list and wrap each record
///     }
///
///     async fn fetch_user(
///         &self,
///         ctx: &FetchContext,
///         scope: &UserScope,
///     ) -> Result<UserEmotes, FetchError> {
///         // GET the user's channel emotes
///     }
/// }
/// ```
#[async_trait]
pub trait EmoteSource: Send + Sync {
    /// The provider this source fetches from.
    fn kind(&self) -> ProviderKind;

    /// Fetches the provider's global emotes.
    async fn fetch_global(&self, ctx: &FetchContext) -> Result<Vec<NativeEmote>, FetchError>;

    /// Fetches the emotes (or emote set ids) of a user/channel.
    async fn fetch_user(
        &self,
        ctx: &FetchContext,
        scope: &UserScope,
    ) -> Result<UserEmotes, FetchError>;

    /// Fetches a single emote set by id.
    ///
    /// Only sources whose [`fetch_user`](Self::fetch_user) returns
    /// [`UserEmotes::Sets`] need to override this.
    async fn fetch_set(
        &self,
        _ctx: &FetchContext,
        set_id: &str,
    ) -> Result<Vec<NativeEmote>, FetchError> {
        Err(FetchError::Unsupported(format!(
            "{} has no emote set lookup (requested {set_id})",
            self.kind()
        )))
    }
}

// ============================================================================
// Tests
// ============================================================================
