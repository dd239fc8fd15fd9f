//! 7TV native records, image selection, and normalization.

use emodl_core::{Emote, EstimateSize, Image};
use emodl_fetch::FetchError;
use serde::{Deserialize, Serialize};

/// Formats tried, in order, when the requested format has no file at the
/// requested scale.
const IMAGE_FALLBACKS: [&str; 11] = [
    "WEBP", "AVIF", "APNG", "GIF", "PNG", "JPEG", "JPG", "JFIF", "PJPEG", "PJP", "SVG",
];

/// Scales included in a normalized emote.
const SEVENTV_SCALES: [&str; 4] = ["1x", "2x", "3x", "4x"];

/// Format used when normalizing.
const DEFAULT_FORMAT: &str = "webp";

// ============================================================================
// Emote
// ============================================================================

/// One file hosted for an emote, e.g. `2x.webp`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SevenTvFile {
    /// File name, prefixed by its scale (`1x.webp`).
    pub name: String,
    /// Name of the first-frame variant.
    #[serde(default)]
    pub static_name: String,
    /// Pixel width.
    #[serde(default)]
    pub width: u32,
    /// Pixel height.
    #[serde(default)]
    pub height: u32,
    /// Number of animation frames.
    #[serde(default)]
    pub frame_count: u32,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
    /// Upper-case format name (`WEBP`, `AVIF`).
    #[serde(default)]
    pub format: String,
}

impl SevenTvFile {
    fn has_scale(&self, scale: &str) -> bool {
        self.name.get(..2) == Some(scale)
    }
}

/// CDN location of an emote's files.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SevenTvHost {
    /// Protocol-relative base URL (`//cdn.7tv.app/emote/{id}`).
    #[serde(default)]
    pub url: String,
    /// Files available under the base URL.
    #[serde(default)]
    pub files: Vec<SevenTvFile>,
}

/// A 7TV emote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SevenTvEmote {
    /// Emote id.
    pub id: String,
    /// Chat name.
    pub name: String,
    /// Whether the emote is animated.
    #[serde(default)]
    pub animated: bool,
    /// Hosted files.
    #[serde(default)]
    pub host: SevenTvHost,
}

impl SevenTvEmote {
    /// Selects the image closest to `scale` (`"2x"`) and `format` (`"webp"`).
    ///
    /// Tries the exact format first, then each fallback format at the same
    /// scale, then settles for the first hosted file.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::MissingImage`] only when the emote has no host
    /// URL or no files.
    pub fn image(&self, scale: &str, format: &str) -> Result<Image, FetchError> {
        if self.host.url.is_empty() {
            return Err(FetchError::MissingImage(format!("{} (no host url)", self.name)));
        }
        let Some(first) = self.host.files.first() else {
            return Err(FetchError::MissingImage(format!("{} (no host files)", self.name)));
        };

        let format = format.to_uppercase();
        let file = self
            .find_file(&format, scale)
            .or_else(|| {
                IMAGE_FALLBACKS
                    .iter()
                    .find_map(|fallback| self.find_file(fallback, scale))
            })
            .unwrap_or(first);

        Ok(self.file_image(file))
    }

    fn find_file(&self, format: &str, scale: &str) -> Option<&SevenTvFile> {
        self.host
            .files
            .iter()
            .find(|f| f.format == format && f.has_scale(scale))
    }

    fn file_image(&self, file: &SevenTvFile) -> Image {
        Image::new(
            format!("{}+{}", self.id, file.name),
            format!("https:{}/{}", self.host.url, file.name),
            file.width,
            file.height,
        )
    }

    /// Normalizes into an [`Emote`] with one webp image per scale.
    ///
    /// Scales that resolve to the same file are listed once.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::MissingImage`] if no image can be selected.
    pub fn to_emote(&self) -> Result<Emote, FetchError> {
        let mut images: Vec<Image> = Vec::with_capacity(SEVENTV_SCALES.len());
        for scale in SEVENTV_SCALES {
            let image = self.image(scale, DEFAULT_FORMAT)?;
            if !images.iter().any(|i| i.id == image.id) {
                images.push(image);
            }
        }

        Ok(Emote::new(&self.id, &self.name, images))
    }
}

impl EstimateSize for SevenTvEmote {
    fn estimated_size(&self) -> usize {
        std::mem::size_of::<Self>()
            + self.id.capacity()
            + self.name.capacity()
            + self.host.url.capacity()
            + self
                .host
                .files
                .iter()
                .map(|f| std::mem::size_of::<SevenTvFile>() + f.name.capacity() + f.static_name.capacity())
                .sum::<usize>()
    }
}

// ============================================================================
// Emote Sets
// ============================================================================

/// An emote as activated in a set, possibly under an alias.
#[derive(Debug, Clone, Deserialize)]
pub struct SevenTvActiveEmote {
    /// Name the emote is used under in this set.
    #[serde(default)]
    pub name: String,
    /// The emote itself; null for deleted emotes.
    #[serde(default)]
    pub data: Option<SevenTvEmote>,
}

/// Response of `GET /v3/emote-sets/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct SevenTvEmoteSet {
    /// Set id.
    #[serde(default)]
    pub id: String,
    /// Set name.
    #[serde(default)]
    pub name: String,
    /// Active emotes.
    #[serde(default)]
    pub emotes: Vec<SevenTvActiveEmote>,
}

impl SevenTvEmoteSet {
    /// Returns the set's emotes, renamed to their in-set alias.
    pub fn into_emotes(self) -> Vec<SevenTvEmote> {
        self.emotes
            .into_iter()
            .filter_map(|active| {
                let mut emote = active.data?;
                if !active.name.is_empty() {
                    emote.name = active.name;
                }
                Some(emote)
            })
            .collect()
    }
}

// ============================================================================
// Users
// ============================================================================

/// Reference to an emote set.
#[derive(Debug, Clone, Deserialize)]
pub struct SevenTvSetRef {
    /// Set id.
    pub id: String,
}

/// A user's link to a chat platform account.
///
/// Also the shape returned by `GET /v3/users/{platform}/{platform_id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SevenTvConnection {
    /// Platform name (`TWITCH`, `YOUTUBE`).
    #[serde(default)]
    pub platform: String,
    /// Active emote set id.
    #[serde(default)]
    pub emote_set_id: Option<String>,
    /// Active emote set.
    #[serde(default)]
    pub emote_set: Option<SevenTvSetRef>,
}

impl SevenTvConnection {
    /// Returns the active emote set id, if any.
    pub fn set_id(&self) -> Option<&str> {
        self.emote_set
            .as_ref()
            .map(|set| set.id.as_str())
            .or(self.emote_set_id.as_deref())
            .filter(|id| !id.is_empty())
    }
}

/// Response of `GET /v3/users/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct SevenTvUser {
    /// 7TV account id.
    pub id: String,
    /// Linked platform accounts.
    #[serde(default)]
    pub connections: Vec<SevenTvConnection>,
}

impl SevenTvUser {
    /// Returns the distinct emote set ids across all connections.
    pub fn emote_set_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        for id in self.connections.iter().filter_map(SevenTvConnection::set_id) {
            if !ids.iter().any(|known| known == id) {
                ids.push(id.to_string());
            }
        }
        ids
    }
}
