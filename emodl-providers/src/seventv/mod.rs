//! 7TV provider implementation.
//!
//! User lookups resolve to emote set ids; each set is then fetched on its
//! own.
//!
//! API documentation: <https://7tv.io/docs>

mod api;
mod descriptor;
mod fetcher;
mod model;

pub use api::{SEVENTV_API_BASE, SevenTvApiClient};
pub use descriptor::seventv_descriptor;
pub use fetcher::SevenTvSource;
pub use model::{
    SevenTvActiveEmote, SevenTvConnection, SevenTvEmote, SevenTvEmoteSet, SevenTvFile,
    SevenTvHost, SevenTvSetRef, SevenTvUser,
};
