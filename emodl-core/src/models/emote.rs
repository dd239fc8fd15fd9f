//! Normalized emote types.
//!
//! Every provider maps its native records into these shapes. The emote
//! `name` is the key the merged catalog is indexed by; it is not unique
//! across providers.

use serde::{Deserialize, Serialize};

use crate::traits::EstimateSize;

// ============================================================================
// Image
// ============================================================================

/// A single image candidate for an emote.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Image {
    /// Absolute image URL.
    pub url: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Image identifier. Not necessarily the emote id.
    pub id: String,
}

impl Image {
    /// Creates a new image candidate.
    pub fn new(id: impl Into<String>, url: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            url: url.into(),
            width,
            height,
            id: id.into(),
        }
    }
}

impl EstimateSize for Image {
    fn estimated_size(&self) -> usize {
        std::mem::size_of::<Self>() + self.url.capacity() + self.id.capacity()
    }
}

// ============================================================================
// Emote
// ============================================================================

/// A provider-independent emote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emote {
    /// Provider-assigned emote id.
    pub id: String,
    /// Chat code of the emote. Catalog key.
    pub name: String,
    /// Image candidates ordered by preference.
    pub images: Vec<Image>,
    /// Where the emote may be used. Empty means unrestricted.
    #[serde(default)]
    pub locations: Vec<String>,
}

impl Emote {
    /// Creates an emote with the given images and no location restrictions.
    pub fn new(id: impl Into<String>, name: impl Into<String>, images: Vec<Image>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            images,
            locations: Vec::new(),
        }
    }

    /// Returns the most preferred image, if any.
    pub fn preferred_image(&self) -> Option<&Image> {
        self.images.first()
    }
}

impl EstimateSize for Emote {
    fn estimated_size(&self) -> usize {
        std::mem::size_of::<Self>()
            + self.id.capacity()
            + self.name.capacity()
            + self.images.iter().map(EstimateSize::estimated_size).sum::<usize>()
            + self.locations.iter().map(String::capacity).sum::<usize>()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preferred_image_is_first() {
        let emote = Emote::new(
            "1",
            "Kappa",
            vec![
                Image::new("1", "https://cdn.example/1x.webp", 28, 28),
                Image::new("1", "https://cdn.example/2x.webp", 56, 56),
            ],
        );

        assert_eq!(emote.preferred_image().unwrap().width, 28);
        assert!(emote.locations.is_empty());
    }

    #[test]
    fn test_locations_default_when_missing() {
        let json = r#"{"id":"1","name":"Kappa","images":[]}"#;
        let emote: Emote = serde_json::from_str(json).unwrap();
        assert!(emote.locations.is_empty());
        assert!(emote.preferred_image().is_none());
    }

    #[test]
    fn test_estimated_size_counts_heap_strings() {
        let bare = Emote::new("", "", Vec::new());
        let full = Emote::new(
            "abcdef",
            "PogChamp",
            vec![Image::new("abcdef", "https://cdn.example/emote/abcdef/1x.webp", 28, 28)],
        );

        assert!(full.estimated_size() > bare.estimated_size());
        assert!(full.estimated_size() >= std::mem::size_of::<Emote>() + std::mem::size_of::<Image>());
    }
}
