//! FFZ native records and normalization.

use emodl_core::{Emote, EstimateSize, Image};
use emodl_fetch::FetchError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Scales tried, in order, when the requested scale is missing.
const FALLBACK_SCALES: [&str; 4] = ["1", "2", "3", "4"];

/// An FFZ emote ("emoticon").
///
/// `urls` maps a scale (`"1"`, `"2"`, `"4"`) to an image URL. FFZ only
/// serves png images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FfzEmote {
    /// Numeric emote id.
    pub id: u64,
    /// Chat code.
    pub name: String,
    /// Height of the 1x image.
    #[serde(default)]
    pub height: u32,
    /// Width of the 1x image.
    #[serde(default)]
    pub width: u32,
    /// Image URL per scale.
    #[serde(default)]
    pub urls: HashMap<String, String>,
}

impl FfzEmote {
    /// Returns the URL for `scale`, falling back to the nearest of 1, 2, 3, 4.
    ///
    /// Returns an empty string when the emote has no URLs at all.
    pub fn url(&self, scale: &str) -> String {
        self.resolve(scale)
            .map(|(_, url)| absolute_url(url))
            .unwrap_or_default()
    }

    /// Returns the image for `scale`, using the same fallback as [`url`](Self::url).
    pub fn image(&self, scale: &str) -> Image {
        let factor = self
            .resolve(scale)
            .and_then(|(key, _)| key.parse::<u32>().ok())
            .unwrap_or(1);
        Image::new(
            self.id.to_string(),
            self.url(scale),
            self.width.saturating_mul(factor),
            self.height.saturating_mul(factor),
        )
    }

    fn resolve(&self, scale: &str) -> Option<(&str, &str)> {
        if let Some((key, url)) = self.urls.get_key_value(scale) {
            return Some((key.as_str(), url.as_str()));
        }

        FALLBACK_SCALES.iter().find_map(|fallback| {
            self.urls
                .get_key_value(*fallback)
                .map(|(key, url)| (key.as_str(), url.as_str()))
        })
    }

    /// Normalizes into an [`Emote`] with one image per available scale,
    /// smallest first.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::MissingImage`] if the emote has no URLs.
    pub fn to_emote(&self) -> Result<Emote, FetchError> {
        let mut scales: Vec<(u32, &str)> = self
            .urls
            .keys()
            .filter_map(|key| key.parse::<u32>().ok().map(|n| (n, key.as_str())))
            .collect();
        scales.sort_unstable();

        let images: Vec<Image> = scales.iter().map(|(_, key)| self.image(key)).collect();
        if images.is_empty() {
            return Err(FetchError::MissingImage(self.name.clone()));
        }

        Ok(Emote::new(self.id.to_string(), &self.name, images))
    }
}

impl EstimateSize for FfzEmote {
    fn estimated_size(&self) -> usize {
        std::mem::size_of::<Self>()
            + self.name.capacity()
            + self
                .urls
                .iter()
                .map(|(k, v)| 2 * std::mem::size_of::<String>() + k.capacity() + v.capacity())
                .sum::<usize>()
    }
}

/// Prefixes protocol-relative CDN URLs with `https:`.
fn absolute_url(url: &str) -> String {
    if url.starts_with("//") {
        format!("https:{url}")
    } else {
        url.to_string()
    }
}

/// A set of FFZ emotes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FfzEmoteSet {
    /// Set id.
    pub id: u64,
    /// Emotes in the set.
    #[serde(rename = "emoticons", default)]
    pub emotes: Vec<FfzEmote>,
}

/// Response of `GET /v1/set/global`.
#[derive(Debug, Clone, Deserialize)]
pub struct FfzGlobalResponse {
    /// Ids of the sets every user sees.
    #[serde(default)]
    pub default_sets: Vec<u64>,
    /// Sets keyed by stringified id.
    #[serde(default)]
    pub sets: HashMap<String, FfzEmoteSet>,
}

impl FfzGlobalResponse {
    /// Resolves `default_sets` through the `sets` map.
    ///
    /// # Errors
    ///
    /// Returns a decode error if a default set id has no matching set.
    pub fn into_default_sets(mut self) -> Result<Vec<FfzEmoteSet>, FetchError> {
        self.default_sets
            .iter()
            .map(|id| take_set(&mut self.sets, *id, "FFZ global sets"))
            .collect()
    }
}

/// Room information from `GET /v1/room/...`.
#[derive(Debug, Clone, Deserialize)]
pub struct FfzRoom {
    /// Id of the room's emote set.
    pub set: u64,
}

/// Response of a room lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct FfzRoomResponse {
    /// The room.
    pub room: FfzRoom,
    /// Sets keyed by stringified id.
    #[serde(default)]
    pub sets: HashMap<String, FfzEmoteSet>,
}

impl FfzRoomResponse {
    /// Returns the room's emote set.
    ///
    /// # Errors
    ///
    /// Returns a decode error if the room set is missing from `sets`.
    pub fn into_room_set(mut self) -> Result<FfzEmoteSet, FetchError> {
        take_set(&mut self.sets, self.room.set, "FFZ room set")
    }
}

fn take_set(
    sets: &mut HashMap<String, FfzEmoteSet>,
    id: u64,
    context: &str,
) -> Result<FfzEmoteSet, FetchError> {
    sets.remove(&id.to_string()).ok_or_else(|| {
        FetchError::decode(
            context,
            <serde_json::Error as serde::de::Error>::custom(format!("set {id} missing from sets")),
        )
    })
}
