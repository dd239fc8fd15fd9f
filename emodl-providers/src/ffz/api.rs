//! FFZ API client.

use emodl_fetch::{FetchError, HttpClient};
use tracing::{debug, instrument};

use super::model::{FfzEmote, FfzEmoteSet, FfzGlobalResponse, FfzRoomResponse};

// ============================================================================
// Constants
// ============================================================================

/// FFZ API base URL (version 1).
pub const FFZ_API_BASE: &str = "https://api.frankerfacez.com/v1";

/// Global sets endpoint.
const GLOBAL_ENDPOINT: &str = "/set/global";

/// Room lookup by Twitch user id.
const TWITCH_ROOM_ENDPOINT: &str = "/room/id";

/// Room lookup by YouTube channel id.
const YOUTUBE_ROOM_ENDPOINT: &str = "/room/yt";

// ============================================================================
// API Client
// ============================================================================

/// FFZ API client.
#[derive(Debug, Clone)]
pub struct FfzApiClient {
    base_url: String,
}

impl FfzApiClient {
    /// Creates a client for the public API.
    pub fn new() -> Self {
        Self::with_base_url(FFZ_API_BASE)
    }

    /// Creates a client for a custom API base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Fetches the default global sets.
    #[instrument(skip(self, http))]
    pub async fn global_sets(&self, http: &HttpClient) -> Result<Vec<FfzEmoteSet>, FetchError> {
        let url = format!("{}{GLOBAL_ENDPOINT}", self.base_url);
        let response: FfzGlobalResponse = http.get_json(&url, "FFZ global sets").await?;
        let sets = response.into_default_sets()?;
        debug!(sets = sets.len(), "Fetched FFZ global sets");
        Ok(sets)
    }

    /// Fetches every emote in the global default sets.
    pub async fn global_emotes(&self, http: &HttpClient) -> Result<Vec<FfzEmote>, FetchError> {
        let sets = self.global_sets(http).await?;
        Ok(sets.into_iter().flat_map(|set| set.emotes).collect())
    }

    /// Fetches the emote set of a channel room.
    ///
    /// Only `twitch` and `youtube` rooms exist on FFZ.
    #[instrument(skip(self, http))]
    pub async fn room_set(
        &self,
        http: &HttpClient,
        platform: &str,
        platform_id: &str,
    ) -> Result<FfzEmoteSet, FetchError> {
        if platform_id.is_empty() {
            return Err(FetchError::InvalidScope(
                "FFZ room lookup needs a platform id".to_string(),
            ));
        }

        let endpoint = match platform {
            "twitch" => TWITCH_ROOM_ENDPOINT,
            "youtube" => YOUTUBE_ROOM_ENDPOINT,
            other => {
                return Err(FetchError::InvalidScope(format!(
                    "FFZ has no rooms for platform '{other}'"
                )));
            }
        };

        let url = format!("{}{endpoint}/{platform_id}", self.base_url);
        let response: FfzRoomResponse = http.get_json(&url, "FFZ room").await?;
        let set = response.into_room_set()?;
        debug!(set = set.id, count = set.emotes.len(), "Fetched FFZ room set");
        Ok(set)
    }
}

impl Default for FfzApiClient {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
