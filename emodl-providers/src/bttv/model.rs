//! BTTV native records and normalization.

use emodl_core::{Emote, EstimateSize, Image};
use serde::{Deserialize, Serialize};

/// CDN base for emote images.
const BTTV_CDN_BASE: &str = "https://cdn.betterttv.net/emote";

/// Image scales served by the CDN, in preference order.
const BTTV_SCALES: [&str; 3] = ["1x", "2x", "3x"];

/// BTTV does not report dimensions; 1x images are 28px tall by convention.
const BTTV_BASE_SIZE: u32 = 28;

/// A BTTV emote as returned by the API.
///
/// The `imageType` field is not kept: the CDN always serves webp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BttvEmote {
    /// Emote id.
    pub id: String,
    /// Chat code.
    #[serde(rename = "code")]
    pub name: String,
    /// Whether the emote is animated.
    #[serde(default)]
    pub animated: bool,
}

impl BttvEmote {
    /// Creates a static emote record.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            animated: false,
        }
    }

    /// Returns the CDN URL for the given scale (`1x`, `2x`, `3x`).
    pub fn url(&self, scale: &str) -> String {
        format!("{BTTV_CDN_BASE}/{}/{scale}.webp", self.id)
    }

    /// Returns the image for the given scale.
    pub fn image(&self, scale: &str) -> Image {
        let factor = scale
            .strip_suffix('x')
            .and_then(|n| n.parse::<u32>().ok())
            .unwrap_or(1);
        let size = BTTV_BASE_SIZE * factor;
        Image::new(&self.id, self.url(scale), size, size)
    }

    /// Normalizes into an [`Emote`] with one image per CDN scale.
    pub fn to_emote(&self) -> Emote {
        Emote::new(
            &self.id,
            &self.name,
            BTTV_SCALES.iter().map(|scale| self.image(scale)).collect(),
        )
    }
}

impl EstimateSize for BttvEmote {
    fn estimated_size(&self) -> usize {
        std::mem::size_of::<Self>() + self.id.capacity() + self.name.capacity()
    }
}

/// A BTTV user with their channel and shared emotes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BttvUser {
    /// BTTV user id.
    #[serde(default)]
    pub id: String,
    /// Emotes uploaded by the user.
    #[serde(default)]
    pub channel_emotes: Vec<BttvEmote>,
    /// Emotes shared into the channel from other users.
    #[serde(default)]
    pub shared_emotes: Vec<BttvEmote>,
}

impl BttvUser {
    /// Returns shared emotes followed by channel emotes.
    pub fn into_emotes(self) -> Vec<BttvEmote> {
        let mut emotes = self.shared_emotes;
        emotes.extend(self.channel_emotes);
        emotes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_global_list() {
        let json = r#"[
            {"id":"54fa925e01e468494b85b54d","code":"OhMyGoodness","imageType":"png","animated":false,"userId":"5561169bd6b9d206222a8c19"},
            {"id":"566ca38765dbbdab32ec0560","code":"SourPls","imageType":"gif","animated":true}
        ]"#;

        let emotes: Vec<BttvEmote> = serde_json::from_str(json).unwrap();
        assert_eq!(emotes.len(), 2);
        assert_eq!(emotes[0].name, "OhMyGoodness");
        assert!(emotes[1].animated);
    }

    #[test]
    fn test_cdn_url() {
        let emote = BttvEmote::new("566ca38765dbbdab32ec0560", "SourPls");
        assert_eq!(
            emote.url("3x"),
            "https://cdn.betterttv.net/emote/566ca38765dbbdab32ec0560/3x.webp"
        );
    }

    #[test]
    fn test_to_emote_orders_scales() {
        let emote = BttvEmote::new("abc", "Kappa").to_emote();

        assert_eq!(emote.id, "abc");
        assert_eq!(emote.name, "Kappa");
        assert_eq!(emote.images.len(), 3);
        assert!(emote.images[0].url.ends_with("/1x.webp"));
        assert_eq!(emote.images[0].width, 28);
        assert_eq!(emote.images[2].height, 84);
        assert!(emote.images.iter().all(|i| i.id == "abc"));
        assert!(emote.locations.is_empty());
    }

    #[test]
    fn test_user_emotes_shared_first() {
        let json = r#"{
            "id": "u1",
            "channelEmotes": [{"id":"c1","code":"Channel"}],
            "sharedEmotes": [{"id":"s1","code":"Shared"}]
        }"#;

        let user: BttvUser = serde_json::from_str(json).unwrap();
        let names: Vec<_> = user.into_emotes().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["Shared", "Channel"]);
    }

    #[test]
    fn test_user_without_emote_lists() {
        let user: BttvUser = serde_json::from_str(r#"{"id":"u1"}"#).unwrap();
        assert!(user.into_emotes().is_empty());
    }
}
