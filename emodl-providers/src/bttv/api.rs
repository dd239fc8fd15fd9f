//! BTTV API client.

use emodl_fetch::{FetchError, HttpClient};
use tracing::{debug, instrument};

use super::model::{BttvEmote, BttvUser};

// ============================================================================
// Constants
// ============================================================================

/// BTTV API base URL (version 3).
pub const BTTV_API_BASE: &str = "https://api.betterttv.net/3";

/// Global emotes endpoint.
const GLOBAL_ENDPOINT: &str = "/cached/emotes/global";

/// User endpoint prefix, followed by `/{platform}/{platformID}`.
const USERS_ENDPOINT: &str = "/cached/users";

// ============================================================================
// API Client
// ============================================================================

/// BTTV API client.
#[derive(Debug, Clone)]
pub struct BttvApiClient {
    base_url: String,
}

impl BttvApiClient {
    /// Creates a client for the public API.
    pub fn new() -> Self {
        Self::with_base_url(BTTV_API_BASE)
    }

    /// Creates a client for a custom API base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Fetches the global emote list.
    #[instrument(skip(self, http))]
    pub async fn global_emotes(&self, http: &HttpClient) -> Result<Vec<BttvEmote>, FetchError> {
        let url = format!("{}{GLOBAL_ENDPOINT}", self.base_url);
        let emotes: Vec<BttvEmote> = http.get_json(&url, "BTTV global emotes").await?;
        debug!(count = emotes.len(), "Fetched BTTV global emotes");
        Ok(emotes)
    }

    /// Fetches a user linked to a platform account.
    #[instrument(skip(self, http))]
    pub async fn user(
        &self,
        http: &HttpClient,
        platform: &str,
        platform_id: &str,
    ) -> Result<BttvUser, FetchError> {
        if platform.is_empty() || platform_id.is_empty() {
            return Err(FetchError::InvalidScope(
                "BTTV user lookup needs both platform and platform id".to_string(),
            ));
        }

        let url = format!("{}{USERS_ENDPOINT}/{platform}/{platform_id}", self.base_url);
        http.get_json(&url, "BTTV user").await
    }

    /// Fetches a user's shared and channel emotes, shared first.
    pub async fn user_emotes(
        &self,
        http: &HttpClient,
        platform: &str,
        platform_id: &str,
    ) -> Result<Vec<BttvEmote>, FetchError> {
        let user = self.user(http, platform, platform_id).await?;
        debug!(user = %user.id, "Fetched BTTV user");
        Ok(user.into_emotes())
    }
}

impl Default for BttvApiClient {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
